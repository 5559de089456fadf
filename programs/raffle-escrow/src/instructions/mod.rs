pub use buy_ticket::*;
pub use commit_draw::*;
pub use initialize::*;
pub use settle_draw::*;
pub use withdraw_fees::*;

pub mod buy_ticket;
pub mod commit_draw;
pub mod initialize;
pub mod settle_draw;
pub mod withdraw_fees;
