pub mod clock;
pub mod config;
pub mod error;
pub mod ipc;
pub mod models;
pub mod notify;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LapseConfig;
pub use error::{LapseError, StoreError, ValidationError};
pub use models::{
    Category, Color, Lifetime, Note, NoteFormat, NoteId, NoteInput, Priority, TimeUnit, User,
};
pub use notify::{Notification, NotificationCenter, NotificationId};
pub use store::{NoteStore, SweepReport};
pub use view::{filter_and_search, format_time_left, sort_notes, Filter, SortBy};
