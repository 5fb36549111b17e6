use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use kl_core::{
    file_utils::path_to_str, json::VersionDetails, IntoIoError, StoreLayout, CLASSPATH_SEPARATOR,
};
use tokio::{io::AsyncWriteExt, process::Command};

use crate::{download::DownloadedGame, LaunchConfig};

use super::error::GameLaunchError;

/// Who the game thinks is playing.
///
/// Only offline play is supported, so the token is a
/// placeholder and the session UUID is random per run.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub uuid: String,
    pub access_token: String,
    pub user_type: String,
}

impl Identity {
    /// # Errors
    /// If the username is empty or contains spaces.
    pub fn offline(username: &str) -> Result<Self, GameLaunchError> {
        if username.is_empty() {
            return Err(GameLaunchError::UsernameIsEmpty);
        }
        if username.contains(' ') {
            return Err(GameLaunchError::UsernameHasSpaces);
        }
        Ok(Self {
            username: username.to_owned(),
            uuid: uuid::Uuid::new_v4().to_string(),
            access_token: "0".to_owned(),
            user_type: "legacy".to_owned(),
        })
    }
}

/// The complete command line for one run of the game.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    /// JVM flags, ending with `-cp <classpath>`.
    pub java_arguments: Vec<String>,
    /// Libraries in order, client jar last.
    pub classpath: Vec<PathBuf>,
    pub natives_dir: PathBuf,
    pub main_class: String,
    pub game_arguments: Vec<String>,
}

impl LaunchPlan {
    /// Builds the command line from the downloaded files.
    ///
    /// JVM flags are fixed (plus any extra `java_args` from
    /// the config); the version document only supplies the
    /// main class and asset index id.
    ///
    /// # Errors
    /// If a path isn't valid unicode.
    pub fn assemble(
        game: &DownloadedGame,
        identity: &Identity,
        version: &VersionDetails,
        layout: &StoreLayout,
        config: &LaunchConfig,
    ) -> Result<Self, GameLaunchError> {
        let mut classpath = game.classpath.clone();
        classpath.push(game.client_jar.clone());

        let classpath_string = classpath
            .iter()
            .map(|n| path_to_str(n))
            .collect::<Result<Vec<_>, _>>()?
            .join(CLASSPATH_SEPARATOR.to_string().as_str());

        let mut java_arguments = vec![
            config.ram_argument(),
            "-XX:+UnlockExperimentalVMOptions".to_owned(),
            "-XX:+UseG1GC".to_owned(),
        ];
        java_arguments.extend(config.java_args.iter().cloned());
        java_arguments.push(format!(
            "-Djava.library.path={}",
            path_to_str(&game.natives_dir)?
        ));
        java_arguments.push("-cp".to_owned());
        java_arguments.push(classpath_string);

        let game_dir = layout.game_dir();
        let assets_dir = layout.assets_dir();
        let mut game_arguments: Vec<String> = [
            ("--username", identity.username.as_str()),
            ("--version", version.id.as_str()),
            ("--gameDir", path_to_str(&game_dir)?),
            ("--assetsDir", path_to_str(&assets_dir)?),
            ("--assetIndex", version.assetIndex.id.as_str()),
            ("--accessToken", identity.access_token.as_str()),
            ("--uuid", identity.uuid.as_str()),
            ("--userType", identity.user_type.as_str()),
        ]
        .into_iter()
        .flat_map(|(flag, value)| [flag.to_owned(), value.to_owned()])
        .collect();
        game_arguments.extend(config.game_args.iter().cloned());

        Ok(Self {
            java_arguments,
            classpath,
            natives_dir: game.natives_dir.clone(),
            main_class: version.main_class().to_owned(),
            game_arguments,
        })
    }

    /// Everything passed to `java`, in order.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        self.java_arguments
            .iter()
            .chain(std::iter::once(&self.main_class))
            .chain(self.game_arguments.iter())
            .cloned()
            .collect()
    }
}

/// Writes one argument per line to `path`, in the format
/// `java @path` reads. The file is flushed and synced
/// before returning.
///
/// # Errors
/// If the file can't be written.
pub async fn write_argfile(arguments: &[String], path: &Path) -> Result<(), GameLaunchError> {
    let mut contents = String::new();
    for argument in arguments {
        contents.push_str(&argfile_token(argument));
        contents.push('\n');
    }

    let mut file = tokio::fs::File::create(path).await.path(path)?;
    file.write_all(contents.as_bytes()).await.path(path)?;
    file.flush().await.path(path)?;
    file.sync_all().await.path(path)?;
    Ok(())
}

/// Quotes a token if the JVM's argument file parser would
/// otherwise split it or treat part of it as a comment.
/// Inside quotes `\` is an escape character, so it's doubled.
fn argfile_token(argument: &str) -> Cow<'_, str> {
    let needs_quotes = argument.is_empty()
        || argument
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#'));
    if !needs_quotes {
        return Cow::Borrowed(argument);
    }
    let escaped = argument.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("\"{escaped}\""))
}

/// Where to find `java`: bare names go through `PATH`,
/// other relative paths are taken from `work_dir`.
#[must_use]
pub fn resolve_java(java: &Path, work_dir: &Path) -> PathBuf {
    if java.is_absolute() || java.components().count() <= 1 {
        java.to_owned()
    } else {
        work_dir.join(java)
    }
}

/// Runs `java @argfile` in `work_dir` and waits for it to exit.
/// The game shares this process's terminal.
///
/// # Errors
/// If the java process couldn't be started.
pub async fn run_game(
    java: &Path,
    argfile: &Path,
    work_dir: &Path,
) -> Result<ExitStatus, GameLaunchError> {
    let java = resolve_java(java, work_dir);
    let argfile = tokio::fs::canonicalize(argfile).await.path(argfile)?;

    Command::new(&java)
        .arg(format!("@{}", argfile.display()))
        .current_dir(work_dir)
        .status()
        .await
        .map_err(|error| GameLaunchError::CommandError {
            java: java.display().to_string(),
            error,
        })
}

/// Copy of `arguments` with the session secrets
/// replaced, for printing.
#[must_use]
pub fn censor(arguments: &[String]) -> Vec<String> {
    const SECRET_FLAGS: &[&str] = &["--accessToken", "--uuid"];

    let mut out = arguments.to_vec();
    for i in 0..out.len().saturating_sub(1) {
        if SECRET_FLAGS.contains(&out[i].as_str()) {
            "[REDACTED]".clone_into(&mut out[i + 1]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> LaunchPlan {
        let layout = StoreLayout::new("/store");
        let version: VersionDetails = serde_json::from_str(
            r#"{
                "id": "1.21",
                "assetIndex": { "id": "17", "sha1": "aa", "url": "https://example.invalid/17.json" },
                "downloads": { "client": { "sha1": "bb", "url": "https://example.invalid/client.jar" } }
            }"#,
        )
        .unwrap();
        let game = DownloadedGame {
            client_jar: layout.version_jar("1.21"),
            classpath: vec![layout.library("a/a.jar"), layout.library("b/b.jar")],
            natives_dir: layout.natives_dir("1.21"),
        };
        let mut config = LaunchConfig::new("/store");
        config.java_args.push("-Dfoo=bar".to_owned());
        let identity = Identity::offline("Steve").unwrap();
        LaunchPlan::assemble(&game, &identity, &version, &layout, &config).unwrap()
    }

    #[test]
    fn client_jar_is_last_on_classpath() {
        let plan = sample_plan();
        let layout = StoreLayout::new("/store");
        assert_eq!(
            plan.classpath,
            vec![
                layout.library("a/a.jar"),
                layout.library("b/b.jar"),
                layout.version_jar("1.21"),
            ]
        );
        let cp = plan.java_arguments.last().unwrap();
        assert!(cp.ends_with("1.21.jar"));
        assert_eq!(cp.matches(CLASSPATH_SEPARATOR).count(), 2);
    }

    #[test]
    fn fixed_flags_come_first() {
        let plan = sample_plan();
        assert_eq!(
            &plan.java_arguments[..4],
            &[
                "-Xmx2048M",
                "-XX:+UnlockExperimentalVMOptions",
                "-XX:+UseG1GC",
                "-Dfoo=bar"
            ]
        );
        assert_eq!(plan.main_class, "net.minecraft.client.main.Main");
    }

    #[test]
    fn every_game_flag_is_present() {
        let plan = sample_plan();
        for flag in [
            "--username",
            "--version",
            "--gameDir",
            "--assetsDir",
            "--assetIndex",
            "--accessToken",
            "--uuid",
            "--userType",
        ] {
            let i = plan.game_arguments.iter().position(|n| n == flag).unwrap();
            assert!(i + 1 < plan.game_arguments.len(), "{flag} has no value");
        }
        let args = plan.arguments();
        let i = args.iter().position(|n| n == "--userType").unwrap();
        assert_eq!(args[i + 1], "legacy");
        let i = args.iter().position(|n| n == "--assetIndex").unwrap();
        assert_eq!(args[i + 1], "17");
    }

    #[test]
    fn main_class_sits_between_jvm_and_game_args() {
        let plan = sample_plan();
        let args = plan.arguments();
        let i = args.iter().position(|n| n == &plan.main_class).unwrap();
        assert_eq!(args[i - 2], "-cp");
        assert_eq!(args[i + 1], "--username");
    }

    #[test]
    fn bad_usernames() {
        assert!(matches!(
            Identity::offline(""),
            Err(GameLaunchError::UsernameIsEmpty)
        ));
        assert!(matches!(
            Identity::offline("Big Steve"),
            Err(GameLaunchError::UsernameHasSpaces)
        ));
    }

    #[test]
    fn argfile_quoting() {
        assert_eq!(argfile_token("--version"), "--version");
        assert_eq!(argfile_token(r"C:\mc\lib.jar"), r"C:\mc\lib.jar");
        assert_eq!(
            argfile_token(r"C:\My Games\lib.jar"),
            r#""C:\\My Games\\lib.jar""#
        );
        assert_eq!(argfile_token("a\"b"), r#""a\"b""#);
        assert_eq!(argfile_token(""), r#""""#);
    }

    #[tokio::test]
    async fn empty_config_arguments_are_kept() {
        let mut plan = sample_plan();
        plan.game_arguments.push("--quickPlayPath".to_owned());
        plan.game_arguments.push(String::new());
        let args = plan.arguments();
        assert_eq!(args.last().map(String::as_str), Some(""));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launch_args.txt");
        write_argfile(&args, &path).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("--quickPlayPath\n\"\"\n"));
    }

    #[tokio::test]
    async fn argfile_has_one_token_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launch_args.txt");
        let args = vec!["--version".to_owned(), "1.21".to_owned()];
        write_argfile(&args, &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "--version\n1.21\n");
    }

    #[test]
    fn java_path_resolution() {
        let work = Path::new("/work");
        assert_eq!(resolve_java(Path::new("java"), work), Path::new("java"));
        assert_eq!(
            resolve_java(Path::new("jdk-21/bin/java"), work),
            Path::new("/work/jdk-21/bin/java")
        );
        assert_eq!(
            resolve_java(Path::new("/usr/bin/java"), work),
            Path::new("/usr/bin/java")
        );
    }

    #[test]
    fn secrets_are_censored() {
        let args: Vec<String> = ["--accessToken", "0", "--uuid", "abc", "--version", "1.21"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(
            censor(&args),
            vec![
                "--accessToken",
                "[REDACTED]",
                "--uuid",
                "[REDACTED]",
                "--version",
                "1.21"
            ]
        );
    }
}
