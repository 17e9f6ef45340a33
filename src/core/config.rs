use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem locations used by the backend.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub history_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let project_root = discover_project_root();
        let user_data_dir = discover_user_data_dir(&project_root);
        let log_dir = user_data_dir.join("logs");
        let history_path = user_data_dir.join("conversation_history.json");
        let catalog_path = env::var("SAVORA_CATALOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root.join("data").join("combined_restaurants.json"));

        for dir in [&user_data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            project_root,
            user_data_dir,
            log_dir,
            history_path,
            catalog_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_project_root() -> PathBuf {
    if let Ok(root) = env::var("SAVORA_ROOT") {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("Cargo.toml").exists() {
        return manifest_dir;
    }

    env::current_dir().unwrap_or(manifest_dir)
}

fn discover_user_data_dir(project_root: &Path) -> PathBuf {
    if let Ok(dir) = env::var("SAVORA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if cfg!(debug_assertions) {
        return project_root.to_path_buf();
    }

    if cfg!(target_os = "windows") {
        let base = env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string()));
        return PathBuf::from(base).join("Savora");
    }

    if cfg!(target_os = "macos") {
        return home_dir()
            .join("Library")
            .join("Application Support")
            .join("Savora");
    }

    let xdg = env::var("XDG_DATA_HOME").unwrap_or_else(|_| {
        home_dir()
            .join(".local/share")
            .to_string_lossy()
            .to_string()
    });
    PathBuf::from(xdg).join("savora")
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Runtime settings, read once from the environment at startup.
///
/// Every field has a default except the Gemini API key, whose absence
/// fails initialization.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the Chroma server.
    pub chroma_url: String,
    /// Collection holding the synthesized restaurant documents.
    pub collection_name: String,
    /// Base URL of the OpenAI-compatible embedding service.
    pub embedding_url: String,
    /// Model id passed to the embedding service.
    pub embedding_model: String,
    /// Gemini API key.
    pub gemini_api_key: Option<String>,
    /// Gemini model id.
    pub gemini_model: String,
    /// Documents per write batch during index load.
    pub index_batch_size: usize,
    /// Candidates requested per retrieval.
    pub retrieve_k: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            chroma_url: env::var("SAVORA_CHROMA_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8001".to_string()),
            collection_name: env::var("SAVORA_COLLECTION")
                .unwrap_or_else(|_| "restaurant_data".to_string()),
            embedding_url: env::var("SAVORA_EMBEDDING_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:1234".to_string()),
            embedding_model: env::var("SAVORA_EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-nomic-embed-text-v1.5".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("GOOGLE_API_KEY"))
                .ok(),
            gemini_model: env::var("SAVORA_GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            index_batch_size: 100,
            retrieve_k: 20,
        }
    }
}
