// Top level failures that end the process

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not set up the backend client: {0}")]
    Client(#[from] ApiError),

    #[error("window system error: {0}")]
    Gui(#[from] eframe::Error),
}
