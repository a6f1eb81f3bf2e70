//! Template content for `weave init`.

/// Starter `weave.toml` describing a typical server/client project layout.
pub const STARTER_CONFIG: &str = r#"# taskweave project configuration.
#
# Each [groups.<group>.<source>] table declares one source. The suite decides
# which tasks it produces; task names are <verb><Group><Source>.

[settings]
# "overwrite" keeps the last definition of a duplicated task name,
# "reject" makes duplicates an error.
collisions = "overwrite"

[toolchain]
tsc = "tsc"
sass = "sass"
debounce_ms = 200

[groups.main.typescript]
suite = "typescript"
input = ["./src/main/typescript/**/*.ts"]
output = "./build/javascript/main"
tsconfig = "./src/main/typescript/tsconfig.json"

[groups.main.resources]
suite = "bundle"
input = ["./src/main/resources/**/*.*"]
output = "./build/bundle/main/resources"

[groups.test.typescript]
suite = "typescript"
input = ["./src/test/typescript/**/*.ts"]
output = "./build/javascript/test"
tsconfig = "./src/test/typescript/tsconfig.json"

[groups.test.resources]
suite = "bundle"
input = ["./src/test/resources/**/*.*"]
output = "./build/bundle/test/resources"

[groups.client.typescript]
suite = "typescript"
input = ["./src/client/typescript/**/*.ts"]
output = "./build/javascript/client"
tsconfig = "./src/client/typescript/tsconfig.json"

[groups.client.sass]
suite = "sass"
input = ["./src/client/sass/**/*.sass"]
output = "./build/css/client"

[groups.client.views]
suite = "bundle"
input = ["./src/client/views/**/*.*"]
output = "./build/bundle/client/views"

[groups.client.static]
suite = "bundle"
input = ["./src/client/static/**/*.*"]
output = "./build/bundle/client/static"

[groups.config.env]
suite = "bundle"
input = [".env", ".default.env"]
output = "./build/bundle/config"
"#;
