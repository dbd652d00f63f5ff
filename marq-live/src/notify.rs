use tokio::sync::broadcast;

/// Messages pushed to connected browsers. Typed internally; serialized to
/// plain text only at the socket boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Connected,
    FileChanged(String),
}

impl Notification {
    /// Wire form. The browser script matches on the "File updated:" prefix.
    pub fn to_message(&self) -> String {
        match self {
            Notification::Connected => "Connected to Live Server".to_string(),
            Notification::FileChanged(name) => format!("File updated: {}", name),
        }
    }
}

/// Handle the watch loop uses to push change notifications into the
/// server's broadcast channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub(crate) fn new(tx: broadcast::Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Broadcasts to every currently connected client. Clients that
    /// connect later never see past messages.
    pub fn file_changed(&self, name: &str) {
        let _ = self.tx.send(Notification::FileChanged(name.to_string()));
    }
}
