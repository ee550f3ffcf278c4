use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, BufReader},
};

/// Read a text file into its lines, without line terminators
pub async fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let mut lines = BufReader::new(File::open(path).await?).lines();
    let mut collected = Vec::new();

    while let Some(line) = lines.next_line().await? {
        collected.push(line);
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_lines_without_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");
        tokio::fs::write(&path, "first\r\nsecond\n\nlast").await.unwrap();

        let lines = read_lines(path.to_str().unwrap()).await.unwrap();

        assert_eq!(lines, vec!["first", "second", "", "last"]);
    }
}
