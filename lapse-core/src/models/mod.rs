pub mod note;
pub mod user;

pub use note::{
    Category, Color, Lifetime, Note, NoteFormat, NoteId, NoteInput, Priority, TimeUnit,
    MAX_CONTENT_CHARS,
};
pub use user::User;
