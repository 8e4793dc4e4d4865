use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("logo image could not be decoded: {0}")]
    Logo(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
