//! VISCA camera control protocol.
//!
//! Requests are `8x QQ RR II data.. FF` where `x` is the camera address,
//! `QQ` is `01` for commands and `09` for inquiries, `RR` the category and
//! `II` the command id. Replies are `y0 Kz payload.. FF` with `y = 8 + address`
//! and `K` the reply kind (4 ack, 5 completion, 6 error).

mod commands;
mod error;
mod packet;
mod port;

pub use commands::*;
pub use error::*;
pub use packet::*;
pub use port::*;
