pub const DEFAULT_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

pub const OBJECTS_URL: &str = "https://resources.download.minecraft.net";

pub const DEFAULT_RAM_MB: usize = 2048;

pub const DEFAULT_VERSION: &str = "1.21";
pub const DEFAULT_USERNAME: &str = "Player";

/// Relative paths are looked up from the game's working
/// directory (the parent of the store).
#[cfg(target_os = "windows")]
pub const DEFAULT_JAVA: &str = "jdk-21/bin/java.exe";
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_JAVA: &str = "jdk-21/bin/java";
