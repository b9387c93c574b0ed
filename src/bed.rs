//! Interval sinks: where emitted intervals go.

use std::io::Write;

use crate::annotation::AnnotationInterval;
use crate::error::Error;

/// Receives intervals in emission order.
pub trait IntervalSink {
    fn write(&mut self, interval: &AnnotationInterval) -> Result<(), Error>;

    /// Called once after the last interval.
    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl IntervalSink for Vec<AnnotationInterval> {
    fn write(&mut self, interval: &AnnotationInterval) -> Result<(), Error> {
        self.push(interval.clone());
        Ok(())
    }
}

/// Writes tab-delimited `chrom start end label gene` lines.
///
/// Coordinates are written as they were read: 1-based and inclusive.
pub struct BedWriter<W: Write> {
    writer: W,
}

impl<W: Write> BedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IntervalSink for BedWriter<W> {
    fn write(&mut self, interval: &AnnotationInterval) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}",
            interval.chrom,
            interval.start,
            interval.end,
            interval.kind.label(),
            interval.gene_label()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use crate::annotation::RegionKind;

    fn interval(kind: RegionKind, gene_id: Option<&str>) -> AnnotationInterval {
        AnnotationInterval {
            chrom: "chr1".to_string(),
            start: 10,
            end: 20,
            kind,
            gene_id: gene_id.map(str::to_string),
        }
    }

    #[test]
    fn writes_tab_delimited_lines() {
        let mut writer = BedWriter::new(Vec::new());
        writer
            .write(&interval(RegionKind::FivePrimeUtr, Some("G1")))
            .unwrap();
        writer.write(&interval(RegionKind::Intergenic, None)).unwrap();
        writer.finish().unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "chr1\t10\t20\t5'UTR\tG1\nchr1\t10\t20\tIntergenic\t.\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_an_io_error() {
        let mut writer = BedWriter::new(FailingWriter);
        let err = writer
            .write(&interval(RegionKind::Cds, Some("G1")))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<AnnotationInterval> = Vec::new();
        sink.write(&interval(RegionKind::Tss, Some("G1"))).unwrap();
        IntervalSink::finish(&mut sink).unwrap();
        assert_eq!(sink.len(), 1);
    }
}
