#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::expect_used)]
#![allow(clippy::manual_assert)]
//! Test tooling for gridboard.
//!
//! - [`LayoutFixture`]: build boards from TOML or from an ASCII picture.
//! - [`assert_layout_sound`] / [`layout_violations`]: check the at-rest invariant
//!   with readable failure output.
//! - [`strategies`]: proptest generators for grids and sound layouts.
//!
//! ```
//! use gridboard_test::{assert_layout_sound, LayoutFixture};
//!
//! let fixture = LayoutFixture::from_ascii(
//!     "
//!     AA..B
//!     AA...
//!     ",
//! )
//! .unwrap();
//! let board = fixture.board().unwrap();
//! assert_layout_sound(board.grid(), board.items());
//! ```

mod assertions;
mod fixture;
pub mod strategies;

pub use assertions::{
    assert_extents_preserved, assert_layout_sound, layout_violations, render_layout,
};
pub use fixture::{FixtureError, LayoutFixture};
