use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

// Re-export types from library crates
pub use card_editor::{DetectRequest, ImageToken, Quad, Side, WarpRequest};
pub use card_layout::LayoutOptions;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum ScanCommand {
    /// Decode a picked photo off the UI thread
    Decode {
        side: Side,
        bytes: Vec<u8>,
    },
    Detect {
        side: Side,
        token: ImageToken,
        bytes: Vec<u8>,
    },
    Warp {
        request: WarpRequest,
    },
    /// Only the newest queued preview is rendered
    ComposePreview {
        front: Option<Arc<DynamicImage>>,
        back: Option<Arc<DynamicImage>>,
        width_px: u32,
        options: LayoutOptions,
    },
    Export {
        front: Arc<DynamicImage>,
        back: Arc<DynamicImage>,
        options: LayoutOptions,
        output_path: PathBuf,
    },
    LoadLayoutConfig {
        path: PathBuf,
    },
}

impl ScanCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ScanCommand::Decode { .. } => "decode",
            ScanCommand::Detect { .. } => "detect",
            ScanCommand::Warp { .. } => "warp",
            ScanCommand::ComposePreview { .. } => "compose preview",
            ScanCommand::Export { .. } => "export",
            ScanCommand::LoadLayoutConfig { .. } => "load layout config",
        }
    }
}

impl From<DetectRequest> for ScanCommand {
    fn from(request: DetectRequest) -> Self {
        ScanCommand::Detect {
            side: request.side,
            token: request.token,
            bytes: request.bytes,
        }
    }
}

impl From<WarpRequest> for ScanCommand {
    fn from(request: WarpRequest) -> Self {
        ScanCommand::Warp { request }
    }
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum ScanUpdate {
    Decoded {
        side: Side,
        image: DynamicImage,
        /// The encoded photo, forwarded to detection
        bytes: Vec<u8>,
    },
    DecodeFailed {
        side: Side,
        message: String,
    },
    Detected {
        side: Side,
        token: ImageToken,
        quad: Quad,
        /// False when `quad` is the default centered box
        found: bool,
    },
    DetectFailed {
        side: Side,
        token: ImageToken,
        message: String,
    },
    Warped {
        side: Side,
        token: ImageToken,
        png: Vec<u8>,
        image: Arc<DynamicImage>,
    },
    WarpFailed {
        side: Side,
        token: ImageToken,
        message: String,
    },
    PreviewComposed {
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    Exported {
        path: PathBuf,
    },
    LayoutConfigLoaded {
        options: LayoutOptions,
    },
    Error {
        message: String,
    },
}

pub type CommandSender = mpsc::UnboundedSender<ScanCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<ScanCommand>;
pub type UpdateSender = mpsc::UnboundedSender<ScanUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<ScanUpdate>;

/// Create the command and update channels shared by the UI and the worker.
pub fn channels() -> ((CommandSender, CommandReceiver), (UpdateSender, UpdateReceiver)) {
    (mpsc::unbounded_channel(), mpsc::unbounded_channel())
}
