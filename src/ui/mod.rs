pub mod controls;
pub mod help;
pub mod key_router;
pub mod keybindings;
pub mod page;
pub mod stepper;
pub mod terminal_guard;
pub mod timer;

pub use help::HelpDialog;
pub use key_router::{KeyRouter, KeySubscription};
pub use page::HomePage;
pub use stepper::Stepper;
pub use timer::Timer;
