use super::Category::{self, *};

/// A known content type and the byte patterns that identify it.
#[derive(Debug)]
pub struct Definition {
    pub mime: &'static str,
    pub category: Category,
    pub extensions: &'static [&'static str],
    /// Byte runs that must appear at fixed offsets
    pub segments: &'static [(usize, &'static [u8])],
    /// Byte runs that must appear somewhere in the leading window
    pub strings: &'static [&'static [u8]],
}

const fn def(
    mime: &'static str,
    category: Category,
    extensions: &'static [&'static str],
    segments: &'static [(usize, &'static [u8])],
    strings: &'static [&'static [u8]],
) -> Definition {
    Definition { mime, category, extensions, segments, strings }
}

// Ordered by priority: on equal certainty the earlier entry wins.
#[rustfmt::skip]
pub static DEFINITIONS: &[Definition] = &[
    // Image
    def("image/png", Image, &[".png"], &[(0, b"\x89PNG\r\n\x1a\n")], &[]),
    def("image/jpeg", Image, &[".jpg", ".jpeg"], &[(0, b"\xff\xd8\xff")], &[]),
    def("image/gif", Image, &[".gif"], &[(0, b"GIF87a")], &[]),
    def("image/gif", Image, &[".gif"], &[(0, b"GIF89a")], &[]),
    def("image/webp", Image, &[".webp"], &[(0, b"RIFF"), (8, b"WEBP")], &[]),
    def("image/tiff", Image, &[".tif", ".tiff"], &[(0, b"II*\x00")], &[]),
    def("image/tiff", Image, &[".tif", ".tiff"], &[(0, b"MM\x00*")], &[]),
    def("image/x-icon", Image, &[".ico"], &[(0, b"\x00\x00\x01\x00")], &[]),
    def("image/heic", Image, &[".heic"], &[(4, b"ftypheic")], &[]),
    def("image/avif", Image, &[".avif"], &[(4, b"ftypavif")], &[]),
    def("image/svg+xml", Image, &[".svg"], &[(0, b"<?xml")], &[b"<svg"]),
    def("image/svg+xml", Image, &[".svg"], &[(0, b"<svg")], &[]),
    def("image/bmp", Image, &[".bmp"], &[(0, b"BM"), (6, b"\x00\x00\x00\x00")], &[]),

    // Audio
    def("audio/mpeg", Audio, &[".mp3"], &[(0, b"ID3")], &[]),
    def("audio/mpeg", Audio, &[".mp3"], &[(0, b"\xff\xfb")], &[]),
    def("audio/mpeg", Audio, &[".mp3"], &[(0, b"\xff\xf3")], &[]),
    def("audio/mpeg", Audio, &[".mp3"], &[(0, b"\xff\xf2")], &[]),
    def("audio/wav", Audio, &[".wav"], &[(0, b"RIFF"), (8, b"WAVE")], &[]),
    def("audio/aiff", Audio, &[".aiff", ".aif"], &[(0, b"FORM"), (8, b"AIFF")], &[]),
    def("audio/flac", Audio, &[".flac"], &[(0, b"fLaC")], &[]),
    def("audio/ogg", Audio, &[".ogg", ".oga"], &[(0, b"OggS")], &[b"\x01vorbis"]),
    def("audio/opus", Audio, &[".opus"], &[(0, b"OggS")], &[b"OpusHead"]),
    def("audio/midi", Audio, &[".mid", ".midi"], &[(0, b"MThd")], &[]),
    def("audio/mp4", Audio, &[".m4a"], &[(4, b"ftypM4A ")], &[]),
    def("audio/amr", Audio, &[".amr"], &[(0, b"#!AMR")], &[]),

    // Video
    def("video/ogg", Video, &[".ogv"], &[(0, b"OggS")], &[b"\x80theora"]),
    def("video/x-msvideo", Video, &[".avi"], &[(0, b"RIFF"), (8, b"AVI ")], &[]),
    def("video/mp4", Video, &[".mp4"], &[(4, b"ftypisom")], &[]),
    def("video/mp4", Video, &[".mp4"], &[(4, b"ftypmp42")], &[]),
    def("video/mp4", Video, &[".mp4"], &[(4, b"ftypmp41")], &[]),
    def("video/mp4", Video, &[".mp4"], &[(4, b"ftypavc1")], &[]),
    def("video/quicktime", Video, &[".mov"], &[(4, b"ftypqt  ")], &[]),
    def("video/3gpp", Video, &[".3gp"], &[(4, b"ftyp3gp")], &[]),
    def("video/webm", Video, &[".webm"], &[(0, b"\x1a\x45\xdf\xa3")], &[b"webm"]),
    def("video/x-matroska", Video, &[".mkv"], &[(0, b"\x1a\x45\xdf\xa3")], &[b"matroska"]),
    def("video/x-flv", Video, &[".flv"], &[(0, b"FLV\x01")], &[]),
    def("video/mpeg", Video, &[".mpg", ".mpeg"], &[(0, b"\x00\x00\x01\xba")], &[]),
    def("video/x-ms-asf", Video, &[".wmv", ".asf"], &[(0, b"\x30\x26\xb2\x75\x8e\x66\xcf\x11")], &[]),
    def("video/mp4", Video, &[".mp4"], &[(4, b"ftyp")], &[]),
    def("audio/ogg", Audio, &[".ogg"], &[(0, b"OggS")], &[]),

    // Text
    def("text/plain", Text, &[".txt"], &[(0, b"\xef\xbb\xbf")], &[]),
    def("text/plain", Text, &[".txt"], &[(0, b"\xff\xfe")], &[]),
    def("text/plain", Text, &[".txt"], &[(0, b"\xfe\xff")], &[]),
    def("text/html", Text, &[".html", ".htm"], &[(0, b"<!DOCTYPE html")], &[]),
    def("text/html", Text, &[".html", ".htm"], &[(0, b"<html")], &[]),
    def("text/xml", Text, &[".xml"], &[(0, b"<?xml")], &[]),
    def("text/rtf", Text, &[".rtf"], &[(0, b"{\\rtf")], &[]),

    // Documents, archives and executables have no preview
    def("application/pdf", Unknown, &[".pdf"], &[(0, b"%PDF-")], &[]),
    def("application/postscript", Unknown, &[".ps"], &[(0, b"%!PS")], &[]),
    def("application/epub+zip", Unknown, &[".epub"], &[(0, b"PK\x03\x04"), (30, b"mimetypeapplication/epub+zip")], &[]),
    def("application/vnd.openxmlformats-officedocument.wordprocessingml.document", Unknown, &[".docx"], &[(0, b"PK\x03\x04")], &[b"word/"]),
    def("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", Unknown, &[".xlsx"], &[(0, b"PK\x03\x04")], &[b"xl/"]),
    def("application/zip", Unknown, &[".zip"], &[(0, b"PK\x03\x04")], &[]),
    def("application/zip", Unknown, &[".zip"], &[(0, b"PK\x05\x06")], &[]),
    def("application/gzip", Unknown, &[".gz"], &[(0, b"\x1f\x8b\x08")], &[]),
    def("application/x-7z-compressed", Unknown, &[".7z"], &[(0, b"7z\xbc\xaf\x27\x1c")], &[]),
    def("application/vnd.rar", Unknown, &[".rar"], &[(0, b"Rar!\x1a\x07")], &[]),
    def("application/x-bzip2", Unknown, &[".bz2"], &[(0, b"BZh")], &[]),
    def("application/x-xz", Unknown, &[".xz"], &[(0, b"\xfd7zXZ\x00")], &[]),
    def("application/vnd.sqlite3", Unknown, &[".sqlite"], &[(0, b"SQLite format 3\x00")], &[]),
    def("application/wasm", Unknown, &[".wasm"], &[(0, b"\x00asm")], &[]),
    def("application/x-elf", Unknown, &[".elf"], &[(0, b"\x7fELF")], &[]),
    def("application/java-vm", Unknown, &[".class"], &[(0, b"\xca\xfe\xba\xbe")], &[]),
    def("application/vnd.microsoft.portable-executable", Unknown, &[".exe", ".dll"], &[(0, b"MZ")], &[b"PE\x00\x00"]),
];
