use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language chapter selected for a workspace.
///
/// Signed: non-positive values name languages outside the numbered Source
/// chapters and must survive a save and reload unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chapter(pub i32);

impl Chapter {
    pub const SOURCE_1: Chapter = Chapter(1);
    pub const SOURCE_2: Chapter = Chapter(2);
    pub const SOURCE_3: Chapter = Chapter(3);
    pub const SOURCE_4: Chapter = Chapter(4);

    /// Numeric chapter value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for Chapter {
    fn default() -> Self {
        Chapter::SOURCE_1
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source \u{00a7}{}", self.0)
    }
}

/// Language variant layered on top of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "native")]
    Native,
    #[serde(rename = "typed")]
    Typed,
    #[serde(rename = "lazy")]
    Lazy,
    #[serde(rename = "non-det")]
    NonDet,
    #[serde(rename = "concurrent")]
    Concurrent,
    #[serde(rename = "wasm")]
    Wasm,
    #[serde(rename = "explicit-control")]
    ExplicitControl,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Native => "native",
            Variant::Typed => "typed",
            Variant::Lazy => "lazy",
            Variant::NonDet => "non-det",
            Variant::Concurrent => "concurrent",
            Variant::Wasm => "wasm",
            Variant::ExplicitControl => "explicit-control",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External library bundled into the evaluation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExternalLibrary {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "SOUNDS")]
    Sounds,
    #[serde(rename = "PIX&FLIX")]
    PixNFlix,
    #[serde(rename = "MACHINELEARNING")]
    MachineLearning,
}

/// Language context of a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageContext {
    pub chapter: Chapter,
    pub variant: Variant,
}

/// A single editor tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTab {
    /// Backing file when the workspace is in folder mode.
    pub file_path: Option<String>,
    /// Editor contents.
    pub value: String,
    /// Line breakpoints, one entry per line.
    pub breakpoints: Vec<String>,
    /// Highlighted `[start, end]` line ranges.
    pub highlighted_lines: Vec<[u32; 2]>,
}

impl EditorTab {
    /// Creates an unsaved tab with the given contents.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Editor configuration of a playground-like workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundWorkspace {
    pub is_folder_mode_enabled: bool,
    /// Index into `editor_tabs`; `None` when no tab is focused.
    pub active_editor_tab_index: Option<usize>,
    pub editor_tabs: Vec<EditorTab>,
    pub is_editor_autorun: bool,
    pub external_library: ExternalLibrary,
    pub context: LanguageContext,
    /// REPL output lines. Never persisted.
    pub output: Vec<String>,
}

impl Default for PlaygroundWorkspace {
    fn default() -> Self {
        Self {
            is_folder_mode_enabled: false,
            active_editor_tab_index: Some(0),
            editor_tabs: vec![EditorTab::default()],
            is_editor_autorun: false,
            external_library: ExternalLibrary::None,
            context: LanguageContext::default(),
            output: Vec::new(),
        }
    }
}

impl PlaygroundWorkspace {
    /// The focused tab, if the index points at one.
    pub fn active_tab(&self) -> Option<&EditorTab> {
        self.active_editor_tab_index
            .and_then(|index| self.editor_tabs.get(index))
    }
}

/// All workspaces known to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceManagerState {
    pub playground: PlaygroundWorkspace,
    /// Workspace backing the embedded textbook. Not persisted.
    pub sicp: PlaygroundWorkspace,
}

impl Default for WorkspaceManagerState {
    fn default() -> Self {
        Self {
            playground: PlaygroundWorkspace::default(),
            sicp: PlaygroundWorkspace {
                context: LanguageContext {
                    chapter: Chapter::SOURCE_4,
                    variant: Variant::Default,
                },
                ..PlaygroundWorkspace::default()
            },
        }
    }
}
