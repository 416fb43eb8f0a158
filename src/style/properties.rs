//! Property parsing: declaration values -> typed [`DeclaredStyle`] fields.

use crate::geometry::{Point, Spacing};
use crate::style::color::Color;
use crate::style::declared::DeclaredStyle;
use crate::style::values::*;

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    /// A keyword or color name, e.g. `fill`, `center`, `white`.
    Ident(String),
    /// An integer, e.g. `12`, `-4`.
    Number(i32),
    /// A hex color literal.
    Color(Color),
}

/// Errors from property parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue { property: property.into(), message: message.into() }
}

fn require_count(values: &[DeclarationValue], property: &str, counts: &[usize]) -> Result<(), PropertyError> {
    if counts.contains(&values.len()) {
        Ok(())
    } else {
        Err(invalid(property, format!("expected {counts:?} values, got {}", values.len())))
    }
}

fn ident<'a>(value: &'a DeclarationValue, property: &str) -> Result<&'a str, PropertyError> {
    match value {
        DeclarationValue::Ident(name) => Ok(name.as_str()),
        other => Err(invalid(property, format!("expected keyword, got: {other:?}"))),
    }
}

fn number(value: &DeclarationValue, property: &str) -> Result<i32, PropertyError> {
    match value {
        DeclarationValue::Number(n) => Ok(*n),
        other => Err(invalid(property, format!("expected number, got: {other:?}"))),
    }
}

fn color(value: &DeclarationValue, property: &str) -> Result<Color, PropertyError> {
    match value {
        DeclarationValue::Color(c) => Ok(*c),
        DeclarationValue::Ident(name) => {
            Color::named(name).ok_or_else(|| invalid(property, format!("unknown color: {name}")))
        }
        other => Err(invalid(property, format!("expected color, got: {other:?}"))),
    }
}

fn single_keyword<'a>(values: &'a [DeclarationValue], property: &str) -> Result<&'a str, PropertyError> {
    require_count(values, property, &[1])?;
    ident(&values[0], property)
}

fn point(values: &[DeclarationValue], property: &str) -> Result<Point, PropertyError> {
    Ok(Point::new(number(&values[0], property)?, number(&values[1], property)?))
}

/// Parse `<n>` | `fit` | `fill`.
pub fn parse_sizing(values: &[DeclarationValue], property: &str) -> Result<Sizing, PropertyError> {
    require_count(values, property, &[1])?;
    match &values[0] {
        DeclarationValue::Number(n) => Ok(Sizing::Fixed(*n)),
        DeclarationValue::Ident(name) => match name.as_str() {
            "fit" => Ok(Sizing::Fit),
            "fill" => Ok(Sizing::Fill),
            other => Err(invalid(property, format!("expected <n>|fit|fill, got: {other}"))),
        },
        other => Err(invalid(property, format!("expected <n>|fit|fill, got: {other:?}"))),
    }
}

/// Parse 1-4 numbers into per-side [`Spacing`] (CSS shorthand order).
pub fn parse_spacing(values: &[DeclarationValue], property: &str) -> Result<Spacing, PropertyError> {
    require_count(values, property, &[1, 2, 3, 4])?;
    let n: Vec<i32> = values.iter().map(|v| number(v, property)).collect::<Result<_, _>>()?;
    Ok(match n.as_slice() {
        [all] => Spacing::all(*all),
        [vertical, horizontal] => Spacing::symmetric(*vertical, *horizontal),
        [top, horizontal, bottom] => Spacing::new(*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => Spacing::new(*top, *right, *bottom, *left),
        _ => unreachable!("count checked above"),
    })
}

fn parse_alignment(values: &[DeclarationValue], property: &str) -> Result<Alignment, PropertyError> {
    match single_keyword(values, property)? {
        "start" => Ok(Alignment::Start),
        "center" => Ok(Alignment::Center),
        "end" => Ok(Alignment::End),
        other => Err(invalid(property, format!("expected start|center|end, got: {other}"))),
    }
}

fn parse_placement(values: &[DeclarationValue]) -> Result<Placement, PropertyError> {
    const P: &str = "position";
    require_count(values, P, &[1, 3])?;
    let mode = match ident(&values[0], P)? {
        "static" => PositionMode::Static,
        "relative" => PositionMode::Relative,
        "absolute" => PositionMode::Absolute,
        other => return Err(invalid(P, format!("expected static|relative|absolute, got: {other}"))),
    };
    let offset = if values.len() == 3 { point(&values[1..], P)? } else { Point::ZERO };
    Ok(Placement { mode, offset })
}

fn parse_background(values: &[DeclarationValue]) -> Result<Background, PropertyError> {
    const P: &str = "background";
    require_count(values, P, &[1])?;
    if values[0] == DeclarationValue::Ident("none".into()) {
        return Ok(Background::None);
    }
    Ok(Background::Solid(color(&values[0], P)?))
}

fn parse_reference(values: &[DeclarationValue]) -> Result<TransparencyReference, PropertyError> {
    const P: &str = "background-reference";
    require_count(values, P, &[1, 2, 4])?;
    match &values[0] {
        DeclarationValue::Ident(name) if name == "none" => Ok(TransparencyReference::None),
        DeclarationValue::Ident(name) if name == "checkerboard" => {
            let tile = match values.get(1) {
                Some(value) => number(value, P)?,
                None => return Err(invalid(P, "checkerboard needs a tile size")),
            };
            if values.len() == 4 {
                Ok(TransparencyReference::Checkerboard {
                    tile,
                    light: color(&values[2], P)?,
                    dark: color(&values[3], P)?,
                })
            } else {
                Ok(TransparencyReference::checkerboard(tile))
            }
        }
        other => {
            require_count(values, P, &[1])?;
            Ok(TransparencyReference::Static(color(other, P)?))
        }
    }
}

fn parse_border(values: &[DeclarationValue]) -> Result<Border, PropertyError> {
    const P: &str = "border";
    require_count(values, P, &[1, 2])?;
    if values.len() == 1 {
        return match ident(&values[0], P)? {
            "none" => Ok(Border::None),
            other => Err(invalid(P, format!("expected none or <width> <color>, got: {other}"))),
        };
    }
    Ok(Border::Solid { width: number(&values[0], P)?, color: color(&values[1], P)? })
}

/// Apply one declaration (property name + values) to `style`.
pub fn apply_declaration(
    style: &mut DeclaredStyle,
    property: &str,
    values: &[DeclarationValue],
) -> Result<(), PropertyError> {
    match property {
        "visibility" => {
            style.visibility = Some(match single_keyword(values, property)? {
                "visible" => Visibility::Visible,
                "hidden" => Visibility::Hidden,
                other => return Err(invalid(property, format!("expected visible|hidden, got: {other}"))),
            });
        }
        "pointer-events" => {
            style.pointer_events = Some(match single_keyword(values, property)? {
                "auto" | "enabled" => PointerEvents::Enabled,
                "none" | "disabled" => PointerEvents::Disabled,
                other => return Err(invalid(property, format!("expected auto|none, got: {other}"))),
            });
        }
        "width" => style.width = Some(parse_sizing(values, property)?),
        "height" => style.height = Some(parse_sizing(values, property)?),
        "position" => style.placement = Some(parse_placement(values)?),
        "color" => {
            require_count(values, property, &[1])?;
            style.foreground = Some(color(&values[0], property)?);
        }
        "background" => style.background = Some(parse_background(values)?),
        "background-reference" => style.background_reference = Some(parse_reference(values)?),
        "background-size" => {
            style.background_size = Some(match single_keyword(values, property)? {
                "fixed" => BackgroundSize::Fixed,
                "contain" => BackgroundSize::Contain,
                other => return Err(invalid(property, format!("expected fixed|contain, got: {other}"))),
            });
        }
        "background-position" => {
            require_count(values, property, &[1, 2])?;
            style.background_position = Some(if values.len() == 2 {
                BackgroundPosition::Fixed(point(values, property)?)
            } else {
                match ident(&values[0], property)? {
                    "center" => BackgroundPosition::Center,
                    other => return Err(invalid(property, format!("expected center or <x> <y>, got: {other}"))),
                }
            });
        }
        "border" => style.border = Some(parse_border(values)?),
        "direction" => {
            style.direction = Some(match single_keyword(values, property)? {
                "row" => Direction::Row,
                "column" => Direction::Column,
                other => return Err(invalid(property, format!("expected row|column, got: {other}"))),
            });
        }
        "align-x" => style.align_x = Some(parse_alignment(values, property)?),
        "align-y" => style.align_y = Some(parse_alignment(values, property)?),
        "padding" => style.padding = Some(parse_spacing(values, property)?),
        "gap" => {
            require_count(values, property, &[1])?;
            style.gap = Some(number(&values[0], property)?);
        }
        other => return Err(PropertyError::UnknownProperty(other.to_owned())),
    }
    Ok(())
}
