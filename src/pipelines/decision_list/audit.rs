use std::io;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use super::ranker::FeatureList;

/// Write the ranking log, one `name\tscore\tsense` line per feature
pub fn write_audit<W: io::Write>(list: &FeatureList, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in list.audit_records() {
        writer.write_record([record.name, record.score.as_str(), record.sense])?;
    }

    writer.flush()?;

    Ok(())
}

/// Append the ranking log to a file, creating it if needed
pub async fn append_audit(list: &FeatureList, path: &str) -> io::Result<()> {
    let mut buffer = Vec::new();
    write_audit(list, &mut buffer).map_err(io::Error::other)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    file.write_all(&buffer).await?;
    file.flush().await
}
