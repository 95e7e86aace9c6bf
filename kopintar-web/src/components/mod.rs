//! Reusable UI components

pub mod alert;
pub mod charts;
pub mod header;
pub mod loading;
pub mod login_dialog;
pub mod modal;
pub mod sidebar;

pub use alert::{notify, EmptyState, ErrorAlert, LoadingError};
pub use charts::{BarChart, PieChart};
pub use header::Header;
pub use loading::Loading;
pub use login_dialog::LoginDialog;
pub use modal::Modal;
pub use sidebar::Sidebar;
