use std::io::{self, Write};

use metacache_core::{FileAttributes, FileMetadataRecord, FileTime, Win32FindData, reparse_tag};
use serde::Serialize;

/// Output sink for records; one implementation per output format.
pub trait RecordPrinter {
    /// Full record, every field.
    fn print_record(&mut self, record: &FileMetadataRecord) -> io::Result<()>;

    /// Compact one-line form used by listings.
    fn print_row(&mut self, record: &FileMetadataRecord) -> io::Result<()>;

    fn print_find_data(&mut self, data: &Win32FindData) -> io::Result<()>;
}

/// Serializable view of a record for JSON output.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    pub path: &'a str,
    pub size: u64,
    pub size_high: u32,
    pub size_low: u32,
    pub index: u64,
    pub index_high: u32,
    pub index_low: u32,
    pub attributes: u32,
    pub attribute_names: Vec<&'static str>,
    pub creation_time: TimeView,
    pub last_access_time: TimeView,
    pub last_write_time: TimeView,
    pub number_of_links: u32,
    pub volume_serial_number: u32,
    pub reserved0: u32,
    pub reserved1: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reparse_tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeView {
    pub ticks: u64,
    pub utc: String,
}

impl From<FileTime> for TimeView {
    fn from(t: FileTime) -> Self {
        Self {
            ticks: t.ticks(),
            utc: t.to_string(),
        }
    }
}

impl<'a> From<&'a FileMetadataRecord> for RecordView<'a> {
    fn from(r: &'a FileMetadataRecord) -> Self {
        Self {
            path: r.path(),
            size: r.size(),
            size_high: r.size_high(),
            size_low: r.size_low(),
            index: r.index(),
            index_high: r.index_high(),
            index_low: r.index_low(),
            attributes: r.attributes().bits(),
            attribute_names: attribute_names(r.attributes()),
            creation_time: r.creation_time().into(),
            last_access_time: r.last_access_time().into(),
            last_write_time: r.last_write_time().into(),
            number_of_links: r.number_of_links(),
            volume_serial_number: r.volume_serial_number(),
            reserved0: r.reserved0(),
            reserved1: r.reserved1(),
            reparse_tag: r.reparse_tag().map(describe_tag),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FindDataView {
    pub file_name: String,
    pub alternate_file_name: String,
    pub file_attributes: u32,
    pub file_size_high: u32,
    pub file_size_low: u32,
    pub creation_time: TimeView,
    pub last_access_time: TimeView,
    pub last_write_time: TimeView,
    pub reserved0: u32,
    pub reserved1: u32,
}

impl From<&Win32FindData> for FindDataView {
    fn from(d: &Win32FindData) -> Self {
        Self {
            file_name: d.file_name(),
            alternate_file_name: d.alternate_file_name(),
            file_attributes: d.file_attributes,
            file_size_high: d.file_size_high,
            file_size_low: d.file_size_low,
            creation_time: FileTime::from(d.creation_time).into(),
            last_access_time: FileTime::from(d.last_access_time).into(),
            last_write_time: FileTime::from(d.last_write_time).into(),
            reserved0: d.reserved0,
            reserved1: d.reserved1,
        }
    }
}

pub fn attribute_names(attrs: FileAttributes) -> Vec<&'static str> {
    attrs.iter_names().map(|(name, _)| name).collect()
}

fn describe_tag(tag: u32) -> String {
    match reparse_tag::name(tag) {
        Some(name) => name.to_owned(),
        None => format!("{tag:#010x}"),
    }
}

/// Human-readable printer.
pub struct HumanPrinter<W: Write> {
    out: W,
    printed: usize,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn separate(&mut self) -> io::Result<()> {
        if self.printed > 0 {
            writeln!(self.out)?;
        }
        self.printed += 1;
        Ok(())
    }
}

impl HumanPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> RecordPrinter for HumanPrinter<W> {
    fn print_record(&mut self, r: &FileMetadataRecord) -> io::Result<()> {
        self.separate()?;
        let out = &mut self.out;
        let names = attribute_names(r.attributes()).join("|");

        writeln!(out, "path:           {}", r.path())?;
        writeln!(
            out,
            "size:           {} (high {:#x}, low {:#x})",
            r.size(),
            r.size_high(),
            r.size_low()
        )?;
        writeln!(
            out,
            "index:          {} (high {:#x}, low {:#x})",
            r.index(),
            r.index_high(),
            r.index_low()
        )?;
        writeln!(out, "attributes:     {:#x} [{names}]", r.attributes().bits())?;
        writeln!(out, "created:        {}", r.creation_time())?;
        writeln!(out, "accessed:       {}", r.last_access_time())?;
        writeln!(out, "written:        {}", r.last_write_time())?;
        writeln!(out, "links:          {}", r.number_of_links())?;
        writeln!(out, "volume serial:  {:#010x}", r.volume_serial_number())?;
        match r.reparse_tag() {
            Some(tag) => writeln!(out, "reserved0:      {:#x} (reparse tag {})", tag, describe_tag(tag))?,
            None => writeln!(out, "reserved0:      {:#x}", r.reserved0())?,
        }
        writeln!(out, "reserved1:      {:#x}", r.reserved1())?;
        out.flush()
    }

    fn print_row(&mut self, r: &FileMetadataRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "{:>14}  {:#010x}  {}  {}",
            r.size(),
            r.attributes().bits(),
            r.last_write_time(),
            r.path()
        )
    }

    fn print_find_data(&mut self, d: &Win32FindData) -> io::Result<()> {
        self.separate()?;
        let out = &mut self.out;
        writeln!(out, "file name:      {}", d.file_name())?;
        writeln!(out, "alternate name: {}", d.alternate_file_name())?;
        writeln!(out, "attributes:     {:#x}", d.file_attributes)?;
        writeln!(
            out,
            "size:           high {:#x}, low {:#x}",
            d.file_size_high, d.file_size_low
        )?;
        writeln!(out, "created:        {}", FileTime::from(d.creation_time))?;
        writeln!(out, "accessed:       {}", FileTime::from(d.last_access_time))?;
        writeln!(out, "written:        {}", FileTime::from(d.last_write_time))?;
        writeln!(out, "reserved:       {:#x} {:#x}", d.reserved0, d.reserved1)?;
        out.flush()
    }
}

/// NDJSON printer: one object per line.
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(io::Error::other)?;
        writeln!(self.out)
    }
}

impl JsonPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> RecordPrinter for JsonPrinter<W> {
    fn print_record(&mut self, r: &FileMetadataRecord) -> io::Result<()> {
        self.emit(&RecordView::from(r))
    }

    fn print_row(&mut self, r: &FileMetadataRecord) -> io::Result<()> {
        self.emit(&RecordView::from(r))
    }

    fn print_find_data(&mut self, d: &Win32FindData) -> io::Result<()> {
        self.emit(&FindDataView::from(d))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
