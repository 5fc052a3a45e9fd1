pub mod health;
pub use self::health::health;

pub mod signup;
pub use self::signup::signup;

pub mod login;
pub use self::login::login;

pub mod logout;
pub use self::logout::logout;

pub mod forgot_password;
pub use self::forgot_password::forgot_password;

pub mod clear_users;
pub use self::clear_users::clear_users;

pub mod pages;

pub mod types;
