// Test infrastructure and utilities for header-tool tests

#![allow(dead_code)]

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PLAYER_H: &str = r#"#pragma once
#include <string>

namespace Game {
    class [[SH::Reflect]] Player {
    public:
        [[SH::Reflect]] int health;
        [[SH::Reflect]] int score;

        void Tick(float dt) { health -= 1; }
    };
}
"#;

pub const WEAPON_H: &str = r#"#pragma once
#include <entities/player.h>

namespace Game {
    struct [[using SH: Reflect]] Weapon {
        [[SH::Reflect]] float damage;
        [[SH::Reflect]] Player* owner;
        int ammo;
    };
}
"#;

pub const PLAIN_H: &str = "class Plain { int x; };\n";

/// Test project structure builder
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    /// Create a new test project with temporary directory
    pub fn new() -> std::io::Result<Self> {
        let root = TempDir::new()?;
        Ok(Self { root })
    }

    /// Get the root path
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Write a file, creating parent directories
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// `include/entities/{player,weapon}.h` and `src/main.cpp` including them
    pub fn with_game_sources(self) -> Self {
        self.file("include/entities/player.h", PLAYER_H);
        self.file("include/entities/weapon.h", WEAPON_H);
        self.file("include/util/plain.h", PLAIN_H);
        self.file(
            "src/main.cpp",
            "#include <entities/weapon.h>\n#include <util/plain.h>\n#include <vector>\n\nint main() { return 0; }\n",
        );
        self
    }

    /// Fake CMake file-API reply for target `name` under `build/`
    pub fn with_cmake_reply(self, name: &str) -> Self {
        let reply = "build/.cmake/api/v1/reply";
        let target_file = format!("target-{}-Debug-0f1e2d.json", name);
        let source_root = self.root_path().to_path_buf();
        let include_dir = self.path("include");

        self.file(
            &format!("{}/codemodel-v2-a1b2c3.json", reply),
            &json!({
                "kind": "codemodel",
                "version": { "major": 2, "minor": 6 },
                "paths": { "source": source_root, "build": self.path("build") },
                "configurations": [{
                    "name": "Debug",
                    "targets": [{ "name": name, "id": format!("{}::@6890", name), "jsonFile": target_file }]
                }]
            })
            .to_string(),
        );
        self.file(
            &format!("{}/{}", reply, target_file),
            &json!({
                "name": name,
                "type": "EXECUTABLE",
                "sources": [
                    { "path": "src/main.cpp", "compileGroupIndex": 0 },
                    { "path": "generated/reflection.cpp", "compileGroupIndex": 0 }
                ],
                "compileGroups": [{
                    "language": "CXX",
                    "includes": [ { "path": include_dir } ]
                }]
            })
            .to_string(),
        );
        self
    }
}
