use std::path::Path;

use tokio::{
    fs::{self, File},
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter},
};
use tracing::{info, warn};

use crate::{
    error::{ConvertError, Result},
    format::{Record, RECORD_SIZE},
    parse::parse_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub records: usize,
}

impl Summary {
    pub fn bytes(&self) -> usize {
        self.records * RECORD_SIZE
    }
}

/// Converts the text workload at `input` into packed records at `output`.
///
/// The input is opened first, so a missing input never clobbers an existing
/// output. Once `output` has been created, any failure removes it again.
pub async fn convert(input: &Path, output: &Path) -> Result<Summary> {
    info!(input = %input.display(), output = %output.display(), "Converting");

    let src = File::open(input)
        .await
        .map_err(ConvertError::io("opening", input))?;
    reject_same_file(input, output).await?;
    let dst = File::create(output)
        .await
        .map_err(ConvertError::io("creating", output))?;

    let res = pack(BufReader::new(src), BufWriter::new(dst)).await;
    let summary = match res {
        Ok(summary) => summary,
        Err(e) => {
            warn!(output = %output.display(), "Conversion failed, removing output");
            if let Err(e) = fs::remove_file(output).await {
                warn!(%e, output = %output.display(), "Could not remove partial output");
            }
            return Err(match e {
                PackError::Read(source) => ConvertError::Io {
                    action: "reading",
                    path: input.to_owned(),
                    source,
                },
                PackError::Write(source) => ConvertError::Io {
                    action: "writing",
                    path: output.to_owned(),
                    source,
                },
                PackError::Line(e) => e,
            });
        }
    };

    info!(
        lines = summary.lines,
        records = summary.records,
        bytes = summary.bytes(),
        "Done"
    );
    Ok(summary)
}

// creating the output truncates it, which would erase an input behind the same path
async fn reject_same_file(input: &Path, output: &Path) -> Result<()> {
    let output = match fs::canonicalize(output).await {
        Ok(path) => path,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ConvertError::io("resolving", output)(e)),
    };
    let input = fs::canonicalize(input)
        .await
        .map_err(ConvertError::io("resolving", input))?;
    if input == output {
        return Err(ConvertError::SameFile { path: input });
    }
    Ok(())
}

// `pack` doesn't know paths; `convert` fills them in
enum PackError {
    Read(std::io::Error),
    Write(std::io::Error),
    Line(ConvertError),
}

async fn pack<R, W>(src: R, mut dst: W) -> std::result::Result<Summary, PackError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = Summary {
        lines: 0,
        records: 0,
    };

    let mut lines = src.lines();
    while let Some(text) = lines.next_line().await.map_err(PackError::Read)? {
        summary.lines += 1;
        let line = summary.lines;

        let encoded = parse_line(&text)
            .and_then(|(number, value)| Record::encode(number, value))
            .map_err(|fault| PackError::Line(ConvertError::at_line(line, &text, fault)))?;

        dst.write_all(&encoded)
            .await
            .map_err(PackError::Write)?;
        summary.records += 1;
    }

    dst.flush().await.map_err(PackError::Write)?;
    dst.shutdown().await.map_err(PackError::Write)?;
    Ok(summary)
}

/// Prints each record of the packed file at `input` as a `number value` line.
pub async fn dump<W>(input: &Path, mut sink: W) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let buf = fs::read(input)
        .await
        .map_err(ConvertError::io("reading", input))?;
    if buf.len() % RECORD_SIZE != 0 {
        return Err(ConvertError::Truncated {
            path: input.to_owned(),
            len: buf.len(),
        });
    }

    let mut count = 0;
    for chunk in buf.chunks_exact(RECORD_SIZE) {
        let record = Record::decode(chunk);
        let line = format!("{} {}\n", record.number, record.value);
        sink.write_all(line.as_bytes())
            .await
            .map_err(ConvertError::io("writing dump of", input))?;
        count += 1;
    }
    sink.flush()
        .await
        .map_err(ConvertError::io("writing dump of", input))?;

    info!(input = %input.display(), records = count, "Dumped");
    Ok(count)
}
