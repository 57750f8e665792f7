//! End-to-end pipeline tests: scan a tree, snapshot it, diff two states,
//! categorize, and resolve dependencies.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use contour_core::{
    classify_changes, diff, snapshot_directory, DependencyGraph, EntityKind, ScanOptions,
};

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const CALC_V1: &str = "\
import math

# Adds two numbers
def add(a, b):
    \"\"\"Returns the sum.\"\"\"
    return a + b

def divide(a, b):
    return a / b

class Calculator:
    def __init__(self, value=0):
        self.value = value

    def apply(self, x):
        self.value += x
        return self.value
";

const CALC_V2: &str = "\
import math

# Adds two numbers
def add(a, b):
    \"\"\"Returns the sum.\"\"\"
    return a + b

def fix_divide(a, b):
    if b == 0:
        return None
    return a / b

def getResult(calc):
    return calc.value

class Calculator:
    def __init__(self, value=0):
        self.value = value

    def apply(self, x):
        self.value += x
        return int(self.value)
";

#[test]
fn test_snapshot_extracts_all_categories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "calc.py", CALC_V1);
    write(dir.path(), "README.md", "# docs\n");

    let (snapshot, stats) = snapshot_directory(dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(stats.skipped, 1);

    let record = snapshot.get("calc.py").unwrap();
    let fn_names: Vec<&str> = record.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fn_names, vec!["add", "divide"]);
    assert_eq!(record.classes[0].name, "Calculator");
    let method_names: Vec<&str> = record.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(method_names, vec!["Calculator.__init__", "Calculator.apply"]);

    let add = &record.functions[0];
    assert_eq!(add.kind, EntityKind::Function);
    assert_eq!(add.doc.as_deref(), Some("Adds two numbers\n\nReturns the sum."));
    assert_eq!(record.imports[0].module, "math");
}

#[test]
fn test_diff_between_two_tree_states() {
    let old_dir = TempDir::new().unwrap();
    let new_dir = TempDir::new().unwrap();
    write(old_dir.path(), "calc.py", CALC_V1);
    write(old_dir.path(), "legacy.py", "def obsolete():\n    pass\n");
    write(new_dir.path(), "calc.py", CALC_V2);
    write(new_dir.path(), "extra.py", "def brand_new():\n    pass\n");

    let (old, _) = snapshot_directory(old_dir.path(), &ScanOptions::default()).unwrap();
    let (new, _) = snapshot_directory(new_dir.path(), &ScanOptions::default()).unwrap();
    let result = diff(&old, &new);

    assert_eq!(result.added_files, vec!["extra.py"]);
    assert_eq!(result.removed_files, vec!["legacy.py"]);
    assert_eq!(result.modified_files.len(), 1);
    assert_eq!(result.modified_files[0].file, "calc.py");

    // divide renamed to fix_divide: one removal, one addition, getResult
    // also added. add() is untouched.
    let added: Vec<&str> = result
        .function_changes
        .added
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(added, vec!["fix_divide", "getResult"]);
    let removed: Vec<&str> = result
        .function_changes
        .removed
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(removed, vec!["divide"]);
    assert!(result.function_changes.modified.is_empty());

    // apply's body changed.
    let modified_methods: Vec<&str> = result
        .method_changes
        .modified
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(modified_methods, vec!["Calculator.apply"]);

    let groups = classify_changes(&result);
    assert_eq!(groups.bug_fix.len(), 1);
    assert_eq!(groups.bug_fix[0].name, "fix_divide");
    assert_eq!(groups.api.len(), 1);
    assert_eq!(groups.api[0].name, "getResult");
}

#[test]
fn test_diff_with_self_is_empty_end_to_end() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "calc.py", CALC_V1);
    let (snapshot, _) = snapshot_directory(dir.path(), &ScanOptions::default()).unwrap();
    let result = diff(&snapshot, &snapshot);
    assert!(result.is_empty());
}

#[test]
fn test_dependency_graph_from_tree() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "main.py",
        "from utils.helpers import format_date\n\ndef run():\n    format_date()\n",
    );
    write(
        dir.path(),
        "src/utils/helpers.py",
        "def format_date():\n    return 'today'\n",
    );

    let (snapshot, _) = snapshot_directory(dir.path(), &ScanOptions::default()).unwrap();
    let graph = DependencyGraph::resolve(&snapshot);
    assert!(graph.has_edge("main.py", "src/utils/helpers.py"));
}

#[test]
fn test_mixed_language_tree() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app.js",
        "const helper = require('helper');\n\nfunction start() {\n    helper.init();\n}\n",
    );
    write(
        dir.path(),
        "shapes.cpp",
        "#include \"shapes.h\"\n\nclass Circle : public Shape {\npublic:\n    double area() const {\n        return 3.14;\n    }\n};\n",
    );
    write(
        dir.path(),
        "Account.java",
        "public class Account {\n    public double getBalance() {\n        return balance;\n    }\n}\n",
    );

    let (snapshot, _) = snapshot_directory(dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(snapshot.len(), 3);

    let js = snapshot.get("app.js").unwrap();
    assert_eq!(js.functions[0].name, "start");
    assert_eq!(js.imports[0].module, "helper");

    let cpp = snapshot.get("shapes.cpp").unwrap();
    assert_eq!(cpp.classes[0].name, "Circle");
    assert_eq!(cpp.methods[0].name, "Circle.area");

    let java = snapshot.get("Account.java").unwrap();
    assert_eq!(java.methods[0].name, "Account.getBalance");
}
