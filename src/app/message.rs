use crate::data::{ProjectSnapshot, ViewMode};
use crate::services::LoadTicket;

/// Result from a background project load
pub enum LoadResult {
    Success(LoadTicket, Box<ProjectSnapshot>),
    Error(LoadTicket, String),
}

/// Command to be executed after update
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    StartLoad(String),
}

/// All possible messages/events in the application
pub enum Message {
    // Navigation
    NextItem,
    PreviousItem,
    GoToTop,
    GoToBottom,

    // View and issue tab switching
    SwitchView(ViewMode),
    NextIssueTab,
    PreviousIssueTab,

    // Actions
    OpenSelected,
    OpenRepository,
    OpenWebsite,
    Refresh,

    // Issue preview
    OpenIssuePreview,
    CloseIssuePreview,
    PreviewScrollDown,
    PreviewScrollUp,

    // Search
    EnterSearchMode,
    ExitSearchMode { clear: bool },
    SearchInput(char),
    SearchBackspace,

    // Project switching
    OpenProjectPrompt,
    CloseProjectPrompt,
    ProjectInput(char),
    ProjectBackspace,
    ConfirmProject,

    // Popups
    ToggleHelp,
    DismissHelp,
    DismissError,

    // Async results
    LoadComplete(LoadResult),

    // System
    Tick,
    Quit,
}
