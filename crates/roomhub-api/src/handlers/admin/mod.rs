//! Administrative handlers. Role checks live in the service layer; these
//! handlers only translate HTTP to service calls.

pub mod guests;
pub mod reports;
pub mod rooms;
pub mod users;
