#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use futures as _;
use tokio as _;
use tokio_rayon as _;

mod test_helpers;

mod backtrace;
mod blockchain;
mod cgas;
mod crypto;
mod encoding;
mod external;
mod flow;
mod gas_factor;
mod jump_absolute;
mod jump_relative;
mod limits;
mod log;
mod memory;
mod metadata;
mod outputs;
mod profile_gas;
mod serde_profile;
mod spec;
mod upgrade;
mod validation;
mod wideint;
