pub mod file;
pub mod message;
pub mod project;
pub mod prompt;

pub use file::ProjectFile;
pub use message::ChatMessage;
pub use project::Project;
pub use prompt::Prompt;
