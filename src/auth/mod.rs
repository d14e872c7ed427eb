pub mod jwt;
pub mod session;

pub use session::{Actor, JwtSessionProvider, Session, SessionProvider};
