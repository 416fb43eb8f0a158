//! Style model: declared records, computed styles, selectors, the cascade,
//! and the text sheet language.

pub mod cascade;
pub mod color;
pub mod computed;
pub mod declared;
pub mod parser;
pub mod properties;
pub mod selector;
pub mod tokenizer;
pub mod values;

pub use cascade::{cascade, StyleRule, StyleRules};
pub use color::Color;
pub use computed::ComputedStyle;
pub use declared::DeclaredStyle;
pub use parser::{parse_sheet, ParseError, StyleSheet};
pub use properties::{DeclarationValue, PropertyError};
pub use selector::{Interaction, Selector, StateCondition, TraitSet};
pub use values::{
    Alignment, Background, BackgroundPosition, BackgroundSize, Border, Direction, Placement,
    PointerEvents, PositionMode, Sizing, TransparencyReference, Visibility,
};
