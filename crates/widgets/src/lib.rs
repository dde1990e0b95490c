//! # widgets
//!
//! egui widgets for the numeric form fields.
//!
//! - [`NumericTextbox`]: the calculator-aware numeric field. Keystrokes and
//!   pastes are validated against the numeric grammar, arrow keys step the
//!   evaluated value, and a mixed multi-selection state resolves on the
//!   first edit. All decisions come from `field_core`; this crate owns
//!   event plumbing, focus, caret/selection state, and painting.
//! - [`RadioRow`]: a one-of-N labeled selection row.
//!
//! Widgets are builder-style and bind to caller-owned state for one frame:
//!
//! ```no_run
//! # use field_core::FieldValue;
//! # use widgets::NumericTextbox;
//! # fn ui(ui: &mut egui::Ui, opacity: &mut FieldValue) {
//! NumericTextbox::new(opacity)
//!     .icon("%")
//!     .minimum(0.0)
//!     .maximum(100.0)
//!     .on_numeric_value_change(|value, _name| {
//!         // push into the document model
//!         let _ = value;
//!     })
//!     .show(ui);
//! # }
//! ```

mod edit_state;
mod numeric_textbox;
mod radio_row;

pub use edit_state::EditState;
pub use numeric_textbox::{NumericTextbox, NumericTextboxResponse};
pub use radio_row::{RadioRow, RadioRowResponse};
