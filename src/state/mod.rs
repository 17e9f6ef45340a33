use std::sync::Arc;

use crate::core::config::{AppPaths, Settings};
use crate::history::HistoryStore;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::query::QueryProcessor;
use crate::rag::chroma::ChromaStore;
use crate::rag::embedding::RemoteEmbedder;
use crate::rag::{
    ContextBuilder, ContextBuilderConfig, IdAllocator, IndexLoader, Retriever, VectorStore,
};
use crate::{catalog, logging};

pub mod error;

use error::InitializationError;

/// Global application state shared across all routes.
///
/// Built exactly once at process start; every consumer receives the same
/// handles by reference instead of lazily opening its own. The default
/// session id lives for the whole process, so chat requests without an
/// explicit session share one conversation.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub settings: Settings,
    pub history: Arc<HistoryStore>,
    pub store: Arc<dyn VectorStore>,
    pub llm: Arc<dyn LlmProvider>,
    pub processor: QueryProcessor,
    pub default_session_id: String,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// Steps:
    /// 1. Resolve paths and settings, initialize logging
    /// 2. Open the conversation history store
    /// 3. Connect to the vector store and bootstrap the index if empty
    /// 4. Construct the LLM provider and the query processor
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        let paths = Arc::new(AppPaths::new());
        logging::init(&paths);
        let settings = Settings::from_env();

        let history = Arc::new(HistoryStore::open(paths.history_path.clone()));

        let embedder = Arc::new(RemoteEmbedder::new(
            &settings.embedding_url,
            &settings.embedding_model,
        ));
        let store: Arc<dyn VectorStore> = Arc::new(
            ChromaStore::connect(&settings.chroma_url, &settings.collection_name, embedder)
                .await
                .map_err(|e| InitializationError::VectorStore(e.into()))?,
        );

        let existing = store
            .count()
            .await
            .map_err(|e| InitializationError::VectorStore(e.into()))?;
        if existing == 0 {
            let records = catalog::load_records(&paths.catalog_path)
                .map_err(|e| InitializationError::Catalog(e.into()))?;
            let loader = IndexLoader::new(store.clone(), settings.index_batch_size);
            let mut allocator = IdAllocator::new();
            let added = loader
                .bootstrap(&records, &mut allocator)
                .await
                .map_err(|e| InitializationError::Bootstrap(e.into()))?;
            tracing::info!("bootstrapped index with {} documents", added);
        }

        let api_key = settings
            .gemini_api_key
            .clone()
            .ok_or_else(|| InitializationError::Llm("GEMINI_API_KEY is not set".to_string()))?;
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(
            api_key,
            settings.gemini_model.clone(),
        ));

        let processor = QueryProcessor::new(
            Retriever::new(store.clone(), settings.retrieve_k),
            ContextBuilder::new(ContextBuilderConfig::default()),
            llm.clone(),
            history.clone(),
        );

        let default_session_id = uuid::Uuid::new_v4().to_string();
        tracing::info!("default session id: {}", default_session_id);

        Ok(Arc::new(AppState {
            paths,
            settings,
            history,
            store,
            llm,
            processor,
            default_session_id,
        }))
    }
}
