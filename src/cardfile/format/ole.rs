//! Length walker for embedded OLE 1 objects.
//!
//! A card in an `RRG` or `DKO` file may carry an OLE 1 object, and the file
//! stores no total size for it. The only way to find the first byte after the
//! object is to replay the OLE 1 object stream grammar, skipping each field.
//!
//! # Object Structure
//! ```text
//! [4] object ID
//! [4] OLE version (0x0001 or 0x0501)
//! [4] format: 1 linked, 2 embedded, 3 static
//! [L] class name
//! static:   [4] width [4] height [L] presentation data
//! embedded: [L] topic [L] item [L] native data  <presentation>
//! linked:   [L] topic [L] item [L] network name [4] network type
//!           [4] link update options  <presentation>
//!
//! <presentation>:
//! [4] OLE version  [4] format ID (0 = none, stop here)  [L] class name
//! METAFILEPICT / BITMAP / DIB: [4] width [4] height [L] presentation data
//! other: [4] clipboard format ([L] format name if it is 0) [L] presentation data
//! ```
//! `[L]` is a length-prefixed field: a `u32` byte count then that many bytes.
//! Integers are little-endian `u32`.

use std::io::{Read, Seek};

use log::{debug, trace, warn};

use crate::cardfile::types::{
    error::{CardFileError, Result},
    models::{ObjectKind, ObjectVersion, ReaderOptions},
};
use crate::cardfile::utils::ByteStream;

/// Class names whose presentation data carries a width and height.
const STANDARD_CLASSES: [&str; 3] = ["METAFILEPICT", "BITMAP", "DIB"];

/// Longest standard class name (`METAFILEPICT`) plus its NUL terminator.
const MAX_STANDARD_CLASS_LEN: u32 = 13;

/// Where an embedded object was found and what the walk learned about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSpan {
    pub kind: Option<ObjectKind>,
    pub version: Option<ObjectVersion>,
    /// Offset of the object ID.
    pub start: u64,
    /// First byte after the object.
    pub end: u64,
    /// False when a lenient walk stopped on an error.
    pub complete: bool,
}

impl ObjectSpan {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Skips the embedded object at the current position.
///
/// On success the stream is positioned on the first byte after the object.
/// With `lenient_objects` set, an error inside the object is logged and the
/// walk ends at whatever position it reached; otherwise the error is returned.
pub fn skip_object<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    options: &ReaderOptions,
) -> Result<ObjectSpan> {
    let start = stream.position();
    debug!("Walking embedded object at {:#x}", start);

    let mut walker = ObjectWalker {
        stream: &mut *stream,
        kind: None,
        version: None,
    };
    let outcome = walker.walk();
    let (kind, version) = (walker.kind, walker.version);

    let complete = match outcome {
        Ok(()) => true,
        Err(e) if options.lenient_objects => {
            warn!("Embedded object at {:#x} could not be walked: {}", start, e);
            stream.resync()?;
            false
        }
        Err(e) => return Err(e),
    };

    let end = stream.position();
    debug!(
        "Embedded object {:?} spans {:#x}..{:#x} ({} bytes)",
        kind,
        start,
        end,
        end - start
    );
    Ok(ObjectSpan {
        kind,
        version,
        start,
        end,
        complete,
    })
}

/// Skips one length-prefixed field and returns its payload length.
///
/// The stream advances by `4 + length` bytes.
pub fn skip_length_prefixed<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    field: &'static str,
) -> Result<u32> {
    let len = stream.read_u32(field)?;
    trace!("{}: {} bytes at {:#x}", field, len, stream.position());
    stream.skip(u64::from(len), field)?;
    Ok(len)
}

/// Walk state; `kind` and `version` are filled in as they are read so that
/// a lenient caller still learns them when the walk fails later on.
struct ObjectWalker<'a, R> {
    stream: &'a mut ByteStream<R>,
    kind: Option<ObjectKind>,
    version: Option<ObjectVersion>,
}

impl<R: Read + Seek> ObjectWalker<'_, R> {
    fn walk(&mut self) -> Result<()> {
        let object_id = self.stream.read_u32("object ID")?;
        trace!("Object ID: {}", object_id);

        self.version = Some(self.read_version()?);

        let offset = self.stream.position();
        let format = self.stream.read_u32("object format")?;
        let kind = ObjectKind::try_from(format)
            .map_err(|format| CardFileError::UnknownObjectFormat { offset, format })?;
        self.kind = Some(kind);
        trace!("Object format: {:?}", kind);

        skip_length_prefixed(self.stream, "class name")?;

        match kind {
            ObjectKind::Static => {
                self.stream.skip(8, "picture extent")?;
                skip_length_prefixed(self.stream, "presentation data")?;
            }
            ObjectKind::Embedded => {
                skip_length_prefixed(self.stream, "topic name")?;
                skip_length_prefixed(self.stream, "item name")?;
                skip_length_prefixed(self.stream, "native data")?;
                self.skip_presentation()?;
            }
            ObjectKind::Linked => {
                skip_length_prefixed(self.stream, "topic name")?;
                skip_length_prefixed(self.stream, "item name")?;
                skip_length_prefixed(self.stream, "network name")?;
                self.stream.skip(8, "network type and link update options")?;
                self.skip_presentation()?;
            }
        }
        Ok(())
    }

    /// Skips the optional presentation object of an embedded or linked object.
    fn skip_presentation(&mut self) -> Result<()> {
        self.read_version()?;
        let format_id = self.stream.read_u32("presentation format ID")?;
        if format_id == 0 {
            trace!("No presentation object");
            return Ok(());
        }

        let class_name = self.read_class_name()?;
        let is_standard = class_name
            .as_deref()
            .is_some_and(|name| STANDARD_CLASSES.iter().any(|class| *class == name));

        if is_standard {
            self.stream.skip(8, "presentation extent")?;
        } else {
            let clipboard_format = self.stream.read_u32("clipboard format")?;
            if clipboard_format == 0 {
                skip_length_prefixed(self.stream, "clipboard format name")?;
            }
        }
        skip_length_prefixed(self.stream, "presentation data")?;
        Ok(())
    }

    fn read_version(&mut self) -> Result<ObjectVersion> {
        let offset = self.stream.position();
        let raw = self.stream.read_u32("OLE version")?;
        let version = ObjectVersion::try_from(raw)
            .map_err(|version| CardFileError::UnsupportedObjectVersion { offset, version })?;
        trace!("OLE version: {:#06x}", raw);
        Ok(version)
    }

    /// Reads a presentation class name.
    ///
    /// Names longer than any standard class are skipped unread and return `None`.
    fn read_class_name(&mut self) -> Result<Option<String>> {
        let len = self.stream.read_u32("class name")?;
        if len > MAX_STANDARD_CLASS_LEN {
            trace!("Class name of {} bytes is not a standard class", len);
            self.stream.skip(u64::from(len), "class name")?;
            return Ok(None);
        }
        let raw = self.stream.read_bytes(len as usize, "class name")?;
        let name = String::from_utf8_lossy(&raw)
            .trim_end_matches('\0')
            .to_owned();
        trace!("Class name: {:?}", name);
        Ok(Some(name))
    }
}
