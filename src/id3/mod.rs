// ID3v2 tag handling module
pub mod comment;
pub mod frames;
pub mod header;
pub mod picture;
pub mod synchsafe;
pub mod tag;
pub mod url;

pub use comment::Comment;
pub use frames::{DecodedFrame, FrameHeader, FrameMap};
pub use header::TagHeader;
pub use picture::{Picture, PictureType};
pub use tag::Id3Tag;
pub use url::UrlLink;
