mod scopes;
pub use self::scopes::*;
mod settings_service;
pub use self::settings_service::*;
mod tokens;
pub use self::tokens::*;
