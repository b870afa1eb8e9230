mod config;
mod status;
mod wizard;

pub use config::ConfigArgs;
pub use config::handle_config;
pub use status::StatusArgs;
pub use status::handle_status;
pub use wizard::handle_wizard;
pub use wizard::handle_wizard_with_prompter;
