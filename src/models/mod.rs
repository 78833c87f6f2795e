pub mod health;
pub mod request;
pub mod response;
pub mod retry;
pub mod template;
pub mod validation;
