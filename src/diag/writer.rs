use {
    crate::diag::config,
    flume::{Receiver, Sender},
    once_cell::sync::Lazy,
    std::{
        fmt,
        fs::{self, File, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
        thread,
        time::Duration,
    },
};

const BANNER_WIDTH: usize = 72;
const FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

enum Message {
    Line(String),
    Flush(Sender<()>),
}

/// `None` once and for all if the variable is unset or the thread could not be started.
///
/// If opening the file fails, the thread exits and every later send fails silently.
static SINK: Lazy<Option<Sender<Message>>> = Lazy::new(|| {
    let path = config::from_env()?;
    let (tx, rx) = flume::unbounded();
    thread::Builder::new()
        .name("atomic-prims-log".to_owned())
        .spawn(move || writer_thread(path, rx))
        .ok()?;
    Some(tx)
});

pub(super) fn submit(args: fmt::Arguments<'_>) {
    if let Some(tx) = &*SINK {
        let _ = tx.send(Message::Line(args.to_string()));
    }
}

/// Waits until every line submitted so far has been written, or for at most one second.
pub fn flush() {
    let Some(tx) = &*SINK else {
        return;
    };
    let (done_tx, done_rx) = flume::bounded(1);
    if tx.send(Message::Flush(done_tx)).is_ok() {
        let _ = done_rx.recv_timeout(FLUSH_TIMEOUT);
    }
}

fn writer_thread(path: PathBuf, rx: Receiver<Message>) {
    let mut file = match open(&path) {
        Ok(f) => f,
        Err(e) => {
            ::log::debug!(target: "atomic_prims", "cannot open {}: {}", path.display(), e);
            return;
        }
    };
    for msg in rx.iter() {
        match msg {
            Message::Line(line) => {
                let _ = writeln!(file, "{}", line).and_then(|_| file.flush());
            }
            Message::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

fn open(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(file, "{}", local_time())?;
    file.flush()?;
    Ok(file)
}

#[cfg(unix)]
fn local_time() -> String {
    use std::{ffi::CStr, ptr};

    unsafe {
        let now = libc::time(ptr::null_mut());
        // ctime output is 26 bytes including the newline and terminator.
        let mut buf = [0 as libc::c_char; 32];
        if libc::ctime_r(&now, buf.as_mut_ptr()).is_null() {
            return now.to_string();
        }
        CStr::from_ptr(buf.as_ptr())
            .to_string_lossy()
            .trim_end()
            .to_owned()
    }
}

#[cfg(not(unix))]
fn local_time() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default()
}
