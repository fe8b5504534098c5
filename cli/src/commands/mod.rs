//! CLI commands for the wordbpe tool.

pub mod applybpe;
pub mod getvocab;
pub mod learnbpe;

pub use applybpe::ApplybpeCommand;
pub use getvocab::GetvocabCommand;
pub use learnbpe::LearnbpeCommand;

/// An empty path argument means the input was not supplied.
pub(crate) fn optional_input(arg: Option<String>) -> Option<String> {
    arg.filter(|path| !path.is_empty())
}
