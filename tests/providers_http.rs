//! Provider client tests against a local mock HTTP server.

use httpmock::prelude::*;
use serde_json::json;

use knowdesk::config::{CompletionConfig, EmbeddingConfig, IndexConfig};
use knowdesk::error::Error;
use knowdesk::providers::{
    ChromaIndex, CompletionProvider, EmbeddingProvider, IndexEntry, JinaEmbedder, OpenAiCompleter,
    OpenRouterCompleter, VectorIndex,
};
use knowdesk::types::{ChatMessage, ChunkMetadata, DocumentFormat};

fn embedding_config(server: &MockServer) -> EmbeddingConfig {
    EmbeddingConfig {
        base_url: server.base_url(),
        api_key: "test-key".to_string(),
        ..EmbeddingConfig::default()
    }
}

fn completion_config(server: &MockServer) -> CompletionConfig {
    CompletionConfig {
        openrouter_base_url: server.base_url(),
        openrouter_api_key: "router-key".to_string(),
        openai_base_url: server.base_url(),
        openai_api_key: "openai-key".to_string(),
        referer: "http://localhost".to_string(),
        ..CompletionConfig::default()
    }
}

fn index_config(server: &MockServer) -> IndexConfig {
    IndexConfig {
        host: server.host(),
        port: server.port(),
        ..IndexConfig::default()
    }
}

fn sample_metadata_json() -> serde_json::Value {
    json!({
        "filename": "handbook.pdf",
        "type": "pdf",
        "created_at": "2024-03-01T12:00:00Z",
        "chunk_index": 2,
        "source": "upload",
    })
}

fn sample_metadata() -> ChunkMetadata {
    serde_json::from_value(sample_metadata_json()).unwrap()
}

// ---------------------------------------------------------------------------
// Jina embeddings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn jina_embeds_a_batch_in_order() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/embeddings")
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    json!({
                        "model": "jina-embeddings-v2-base-en",
                        "input": ["first text", "second text"],
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({
                "model": "jina-embeddings-v2-base-en",
                "data": [
                    { "index": 0, "embedding": [0.1, 0.2, 0.3] },
                    { "index": 1, "embedding": [0.4, 0.5, 0.6] },
                ],
            }));
        })
        .await;

    let embedder = JinaEmbedder::new(&embedding_config(&server));
    let texts = vec!["first text".to_string(), "second text".to_string()];
    let vectors = embedder.embed_batch(&texts).await.unwrap();

    mock.assert_async().await;
    assert_eq!(vectors, vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]);
}

#[tokio::test]
async fn jina_surfaces_api_errors() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(401)
                .json_body(json!({ "detail": "invalid api key" }));
        })
        .await;

    let embedder = JinaEmbedder::new(&embedding_config(&server));
    let err = embedder
        .embed_batch(&["anything".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Embedding(_)));
    assert!(err.to_string().contains("401"));
}

// ---------------------------------------------------------------------------
// Chat completion providers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openrouter_returns_the_first_choice_and_sends_referer() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer router-key")
                .header("http-referer", "http://localhost")
                .json_body_partial(
                    json!({
                        "model": "meta-llama/llama-3.2-3b-instruct:free",
                        "max_tokens": 500,
                        "messages": [
                            { "role": "system", "content": "You answer from context." },
                            { "role": "user", "content": "What are office hours?" },
                        ],
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Office hours are 9 to 5." } },
                    { "message": { "role": "assistant", "content": "ignored second choice" } },
                ],
            }));
        })
        .await;

    let completer = OpenRouterCompleter::new(&completion_config(&server));
    let messages = vec![
        ChatMessage::system("You answer from context."),
        ChatMessage::user("What are office hours?"),
    ];
    let answer = completer.complete(&messages).await.unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "Office hours are 9 to 5.");
}

#[tokio::test]
async fn openrouter_with_no_choices_is_an_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let completer = OpenRouterCompleter::new(&completion_config(&server));
    let err = completer
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Completion(_)));
}

#[tokio::test]
async fn openai_returns_the_completion_content() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer openai-key");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Done." } },
                ],
            }));
        })
        .await;

    let completer = OpenAiCompleter::new(&completion_config(&server));
    let answer = completer
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "Done.");
}

// ---------------------------------------------------------------------------
// Chroma index
// ---------------------------------------------------------------------------

async fn mock_collection(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/collections")
                .json_body_partial(
                    json!({
                        "name": "company_knowledge",
                        "get_or_create": true,
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({
                "id": "col-123",
                "name": "company_knowledge",
            }));
        })
        .await
}

#[tokio::test]
async fn chroma_connect_resolves_the_collection_id() {
    let server = MockServer::start_async().await;
    let mock = mock_collection(&server).await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(index.name(), "company_knowledge");
}

#[tokio::test]
async fn chroma_connect_fails_when_the_service_is_down() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections");
            then.status(500).body("internal error");
        })
        .await;

    let err = ChromaIndex::connect(&index_config(&server)).await.unwrap_err();
    assert!(matches!(err, Error::Index(_)));
}

#[tokio::test]
async fn chroma_insert_posts_parallel_arrays() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/collections/col-123/add")
                .json_body_partial(
                    json!({
                        "ids": ["doc-chunk-0"],
                        "documents": ["Office hours run from eight to five."],
                        "embeddings": [[0.1, 0.2, 0.3]],
                    })
                    .to_string(),
                );
            then.status(201).json_body(json!(true));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();
    index
        .insert_many(&[IndexEntry {
            id: "doc-chunk-0".to_string(),
            embedding: vec![0.1, 0.2, 0.3],
            content: "Office hours run from eight to five.".to_string(),
            metadata: sample_metadata(),
        }])
        .await
        .unwrap();

    add.assert_async().await;
}

#[tokio::test]
async fn chroma_insert_of_nothing_skips_the_request() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    let add = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-123/add");
            then.status(201).json_body(json!(true));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();
    index.insert_many(&[]).await.unwrap();

    assert_eq!(add.hits_async().await, 0);
}

#[tokio::test]
async fn chroma_query_unwraps_the_nested_result_row() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    let query = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/collections/col-123/query")
                .json_body_partial(json!({ "n_results": 3 }).to_string());
            then.status(200).json_body(json!({
                "ids": [["doc-chunk-2"]],
                "documents": [["Office hours run from eight to five."]],
                "metadatas": [[sample_metadata_json()]],
                "distances": [[0.18]],
            }));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();
    let matches = index.query(&[0.1, 0.2, 0.3], 3).await.unwrap();

    query.assert_async().await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].content, "Office hours run from eight to five.");
    assert_eq!(matches[0].metadata.filename, "handbook.pdf");
    assert_eq!(matches[0].metadata.format, DocumentFormat::Pdf);
    assert_eq!(matches[0].metadata.chunk_index, 2);
    assert!((matches[0].distance - 0.18).abs() < 1e-6);
}

#[tokio::test]
async fn chroma_query_with_no_result_rows_is_empty() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-123/query");
            then.status(200).json_body(json!({
                "ids": [],
                "documents": [],
                "metadatas": [],
                "distances": [],
            }));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();
    let matches = index.query(&[0.1, 0.2, 0.3], 3).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn chroma_count_and_delete_round_trip() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/collections/col-123/count");
            then.status(200).json_body(json!(42));
        })
        .await;

    let delete = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/collections/col-123/delete")
                .json_body_partial(json!({ "ids": ["doc-chunk-0"] }).to_string());
            then.status(200).json_body(json!(["doc-chunk-0"]));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();

    assert_eq!(index.count().await.unwrap(), 42);
    index.delete("doc-chunk-0").await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn chroma_get_all_zips_ids_documents_and_metadata() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-123/get");
            then.status(200).json_body(json!({
                "ids": ["doc-chunk-0", "doc-chunk-1"],
                "documents": ["First stored chunk text.", "Second stored chunk text."],
                "metadatas": [sample_metadata_json(), sample_metadata_json()],
            }));
        })
        .await;

    let index = ChromaIndex::connect(&index_config(&server)).await.unwrap();
    let all = index.get_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "doc-chunk-0");
    assert_eq!(all[1].content, "Second stored chunk text.");
    assert_eq!(all[1].metadata.source, "upload");
}
