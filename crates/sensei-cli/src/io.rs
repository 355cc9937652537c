//! ファイルI/O（gzip対応）

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

fn is_gz(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// ファイル全体を読む（`-` は標準入力、拡張子 `.gz` は展開する）
pub fn read_input<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    let p = path.as_ref();
    let mut buf = Vec::new();
    if p.to_string_lossy() == "-" {
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    let f = File::open(p)?;
    if is_gz(p) {
        flate2::read::GzDecoder::new(f).read_to_end(&mut buf)?;
    } else {
        io::BufReader::new(f).read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// 圧縮出力の終了処理エラーを伝播するための Writer
#[must_use = "call .close() to propagate compression/IO errors"]
pub enum Writer {
    Plain(BufWriter<File>),
    Stdout(io::Stdout),
    Gz(flate2::write::GzEncoder<File>),
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Writer::Plain(f) => f.write(buf),
            Writer::Stdout(s) => s.write(buf),
            Writer::Gz(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => f.flush(),
            Writer::Stdout(s) => s.flush(),
            Writer::Gz(e) => e.flush(),
        }
    }
}

impl Writer {
    /// ストリームを閉じる
    pub fn close(self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => {
                let mut file = f.into_inner().map_err(|e| e.into_error())?;
                file.flush()
            }
            Writer::Stdout(mut s) => s.flush(),
            Writer::Gz(e) => {
                let mut f = e.finish()?;
                f.flush()
            }
        }
    }
}

/// 出力先を開く（None は標準出力、拡張子 `.gz` は圧縮する）
pub fn open_writer(path: Option<&Path>) -> io::Result<Writer> {
    let Some(p) = path else {
        return Ok(Writer::Stdout(io::stdout()));
    };
    let f = File::create(p)?;
    if is_gz(p) {
        Ok(Writer::Gz(flate2::write::GzEncoder::new(f, flate2::Compression::default())))
    } else {
        Ok(Writer::Plain(BufWriter::new(f)))
    }
}
