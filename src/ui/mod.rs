pub mod game_ui;

pub use game_ui::GameUiPlugin;
