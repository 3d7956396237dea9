use std::path::{Path, PathBuf};

fn main() {
    let couriers_dir = Path::new("couriers");
    let files = courier_files(couriers_dir);

    let mut total_services = 0;
    for path in &files {
        total_services += validate_courier_file(path);
    }

    println!(
        "cargo:warning=Validated couriers: {} files, {total_services} tracking services",
        files.len()
    );
    write_embedded_table(&files);
    set_build_dependencies(&files);
}

fn courier_files(couriers_dir: &Path) -> Vec<PathBuf> {
    // Ensure the definitions exist at build time
    assert!(
        couriers_dir.is_dir(),
        "\n\nCOURIER BUILD ERROR: Directory not found\n\
         Path: {}\n\
         The embedded courier definitions must live in this directory.\n",
        couriers_dir.display()
    );

    let entries = std::fs::read_dir(couriers_dir).unwrap_or_else(|e| {
        panic!(
            "\n\nCOURIER BUILD ERROR: Failed to read directory\n\
             Path: {}\n\
             Error: {e}\n",
            couriers_dir.display()
        );
    });

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    assert!(
        !files.is_empty(),
        "\n\nCOURIER BUILD ERROR: No courier definitions found in {}\n",
        couriers_dir.display()
    );

    files
}

fn validate_courier_file(path: &Path) -> usize {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nCOURIER BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let courier: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCOURIER BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            path.display()
        );
    });

    validate_courier_structure(&courier, path)
}

fn validate_courier_structure(courier: &serde_json::Value, path: &Path) -> usize {
    let file = path.display();

    assert!(
        courier.is_object(),
        "\n\nCOURIER BUILD ERROR: Root of {file} must be a JSON object\n"
    );

    for field in ["name", "courier_code"] {
        assert!(
            courier.get(field).and_then(|v| v.as_str()).is_some(),
            "\n\nCOURIER BUILD ERROR: {file} missing string field '{field}'\n"
        );
    }

    let services = courier
        .get("tracking_numbers")
        .and_then(|v| v.as_array())
        .unwrap_or_else(|| {
            panic!(
                "\n\nCOURIER BUILD ERROR: {file} must have a 'tracking_numbers' array\n"
            );
        });

    for (i, service) in services.iter().enumerate() {
        validate_service_fields(service, &file.to_string(), i);
    }

    services.len()
}

fn validate_service_fields(service: &serde_json::Value, file: &str, index: usize) {
    let service_id = service
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    for field in ["id", "name"] {
        assert!(
            service.get(field).and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty()),
            "\n\nCOURIER BUILD ERROR: {file} service '{service_id}' (index {index}) missing '{field}' field\n"
        );
    }

    // A pattern is either one string or a list of fragments joined together
    let regex = service.get("regex");
    let valid_regex = match regex {
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(serde_json::Value::Array(parts)) => {
            !parts.is_empty() && parts.iter().all(serde_json::Value::is_string)
        }
        _ => false,
    };
    assert!(
        valid_regex,
        "\n\nCOURIER BUILD ERROR: {file} service '{service_id}' (index {index}) has no usable 'regex'\n\
         Expected a non-empty string or an array of strings.\n"
    );
}

/// Write the `(file name, contents)` table that `Registry::load_embedded` compiles in
fn write_embedded_table(files: &[PathBuf]) {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .unwrap_or_else(|e| panic!("\n\nCOURIER BUILD ERROR: CARGO_MANIFEST_DIR not set: {e}\n"));
    let out_dir = std::env::var("OUT_DIR")
        .unwrap_or_else(|e| panic!("\n\nCOURIER BUILD ERROR: OUT_DIR not set: {e}\n"));

    let mut table = String::from("&[\n");
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let absolute = Path::new(&manifest_dir).join(path);
        table.push_str(&format!(
            "    ({name:?}, include_str!({:?})),\n",
            absolute.to_string_lossy()
        ));
    }
    table.push(']');

    let target = Path::new(&out_dir).join("embedded_couriers.rs");
    std::fs::write(&target, table).unwrap_or_else(|e| {
        panic!(
            "\n\nCOURIER BUILD ERROR: Failed to write embedded table\n\
             Path: {}\n\
             Error: {e}\n",
            target.display()
        );
    });
}

fn set_build_dependencies(files: &[PathBuf]) {
    // Tell cargo to rerun if a definition is added, removed, or changed
    println!("cargo:rerun-if-changed=couriers");
    for path in files {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
