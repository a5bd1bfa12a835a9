/// Coarse media family, decided by MIME type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
            MediaKind::Audio => "audio/",
        }
    }

    /// Prefix test; an absent type never matches.
    pub fn matches(&self, content_type: Option<&str>) -> bool {
        content_type.is_some_and(|ty| ty.starts_with(self.prefix()))
    }
}
