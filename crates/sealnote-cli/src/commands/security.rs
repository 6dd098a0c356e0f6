//! Password rotation and store inspection.

use secrecy::ExposeSecret;

use sealnote_core::crypto::KdfAlgorithm;
use sealnote_core::store::{read_header, StoreHeader};

use crate::app::AppContext;
use crate::cli::{InfoArgs, PasswdArgs};
use crate::errors::from_store_error;
use crate::helpers::{is_interactive, prompt_replacement_passphrase};

pub fn handle_passwd(ctx: &AppContext, args: &PasswdArgs) -> anyhow::Result<()> {
    ctx.require_existing_store()?;
    let mut store = ctx.open_store(args.no_input)?;

    let new_password = prompt_replacement_passphrase(is_interactive(args.no_input))?;
    ctx.warn_weak_passphrase(new_password.expose_secret());
    let params = ctx.kdf_params()?;

    store
        .change_password(&new_password, &params)
        .map_err(from_store_error)?;

    if !ctx.quiet() {
        println!("Password changed for {}", store.path().display());
    }
    Ok(())
}

pub fn handle_info(ctx: &AppContext, args: &InfoArgs) -> anyhow::Result<()> {
    let path = ctx.require_existing_store()?;
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let header = read_header(&bytes).map_err(from_store_error)?;

    if args.json {
        println!("{}", info_json(&path.to_string_lossy(), bytes.len(), &header));
        return Ok(());
    }

    let params = &header.key_material.params;
    println!("Path:        {}", path.display());
    println!("Size:        {} bytes", bytes.len());
    println!("Format:      v{}", header.version);
    println!("KDF:         {}", algorithm_name(params.algorithm));
    println!("  memory:      {} KiB", params.memory_kib);
    println!("  iterations:  {}", params.iterations);
    println!("  parallelism: {}", params.parallelism);
    println!("Salt:        {} bytes", header.key_material.salt.len());
    Ok(())
}

fn algorithm_name(algorithm: KdfAlgorithm) -> &'static str {
    match algorithm {
        KdfAlgorithm::Argon2id => "argon2id",
    }
}

fn info_json(path: &str, size: usize, header: &StoreHeader) -> serde_json::Value {
    let params = &header.key_material.params;
    serde_json::json!({
        "path": path,
        "size_bytes": size,
        "format_version": header.version,
        "kdf": {
            "algorithm": algorithm_name(params.algorithm),
            "memory_kib": params.memory_kib,
            "iterations": params.iterations,
            "parallelism": params.parallelism,
        },
        "salt_bytes": header.key_material.salt.len(),
    })
}
