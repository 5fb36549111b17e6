use kl_core::{file_utils::sha1_bytes, ContentStore, MemoryFetcher, Platform};
use kl_instances::{prepare, LaunchConfig};

const MANIFEST: &str = "https://meta.example.invalid/version_manifest.json";
const DETAILS: &str = "https://meta.example.invalid/1.21.json";
const CLIENT: &str = "https://dl.example.invalid/client.jar";
const LIBRARY: &str = "https://libs.example.invalid/org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar";
const INDEX: &str = "https://meta.example.invalid/indexes/17.json";
const RESOURCES: &str = "https://resources.example.invalid";

struct Fixture {
    store: ContentStore<MemoryFetcher>,
    config: LaunchConfig,
    _dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("launcher_data");
    let fetcher = MemoryFetcher::new();

    let client = b"client jar bytes".as_slice();
    let library = b"library jar bytes".as_slice();
    let object = b"sound bytes".as_slice();
    let object_hash = sha1_bytes(object);
    let index = format!(
        r#"{{"objects":{{"minecraft/sounds/click.ogg":{{"hash":"{object_hash}","size":{}}}}}}}"#,
        object.len()
    );

    let details = format!(
        r#"{{
            "id": "1.21",
            "mainClass": "net.minecraft.client.main.Main",
            "assetIndex": {{ "id": "17", "sha1": "{index_sha}", "url": "{INDEX}" }},
            "downloads": {{ "client": {{ "sha1": "{client_sha}", "url": "{CLIENT}" }} }},
            "libraries": [
                {{
                    "name": "org.lwjgl:lwjgl:3.3.3",
                    "downloads": {{
                        "artifact": {{
                            "path": "org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar",
                            "sha1": "{library_sha}",
                            "url": "{LIBRARY}"
                        }}
                    }}
                }}
            ]
        }}"#,
        index_sha = sha1_bytes(index.as_bytes()),
        client_sha = sha1_bytes(client),
        library_sha = sha1_bytes(library),
    );

    fetcher.insert(
        MANIFEST,
        format!(r#"{{"versions":[{{"id":"1.21","url":"{DETAILS}"}}]}}"#),
    );
    fetcher.insert(DETAILS, details);
    fetcher.insert(CLIENT, client);
    fetcher.insert(LIBRARY, library);
    fetcher.insert(INDEX, index);
    fetcher.insert(
        format!("{RESOURCES}/{}/{object_hash}", &object_hash[..2]),
        object,
    );

    let mut config = LaunchConfig::new(&root);
    config.manifest_url = MANIFEST.to_owned();
    config.resources_url = RESOURCES.to_owned();
    config.version = "1.21".to_owned();
    config.platform = Some(Platform::Linux);

    Fixture {
        store: ContentStore::new(&root, fetcher),
        config,
        _dir: dir,
    }
}

#[tokio::test]
async fn downloads_everything_and_writes_argfile() {
    let Fixture { store, config, _dir } = fixture();
    let layout = store.layout();

    let prepared = prepare(&store, &config).await.unwrap();

    assert_eq!(
        prepared.plan.classpath,
        vec![
            layout.library("org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar"),
            layout.version_jar("1.21"),
        ]
    );
    assert_eq!(
        std::fs::read(layout.library("org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar")).unwrap(),
        b"library jar bytes"
    );
    assert!(layout.game_dir().is_dir());

    let argfile = std::fs::read_to_string(&prepared.argfile).unwrap();
    let lines: Vec<&str> = argfile.lines().collect();
    let i = lines.iter().position(|n| *n == "--version").unwrap();
    assert_eq!(lines[i + 1], "1.21");
    assert!(lines.contains(&"net.minecraft.client.main.Main"));
}

#[tokio::test]
async fn second_run_only_fetches_the_catalog() {
    let Fixture { store, config, _dir } = fixture();

    prepare(&store, &config).await.unwrap();
    let first = store.fetcher().requests().len();
    assert_eq!(first, 6);

    prepare(&store, &config).await.unwrap();
    let requests = store.fetcher().requests();
    assert_eq!(requests.len(), first + 1);
    assert_eq!(requests.last().map(String::as_str), Some(MANIFEST));
}

#[tokio::test]
async fn downloads_happen_in_pipeline_order() {
    let Fixture { store, config, _dir } = fixture();

    prepare(&store, &config).await.unwrap();
    let requests = store.fetcher().requests();
    assert_eq!(&requests[..5], &[MANIFEST, DETAILS, CLIENT, LIBRARY, INDEX]);
    assert!(requests[5].starts_with(RESOURCES));
}
