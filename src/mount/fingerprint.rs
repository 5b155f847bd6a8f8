use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

use crate::render::descriptor::{
    ApplicationConfig, ComponentRef, ModuleMetadata, ModuleRef, Provider,
};

const XXH3_SEED: u64 = 0x5d1c_0a3e_97b2_46f1;

/// Stable structural fingerprint of a tree's declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MetadataFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint module metadata. An absent block hashes like an empty one.
pub fn fingerprint_module_metadata(meta: Option<&ModuleMetadata>) -> MetadataFingerprint {
    let mut h = StableHasher::new();
    if let Some(m) = meta {
        write_module_metadata(&mut h, m);
    } else {
        write_module_metadata(&mut h, &ModuleMetadata::default());
    }
    h.finish()
}

/// Fingerprint application config. An absent config hashes like an empty one.
pub fn fingerprint_application_config(cfg: Option<&ApplicationConfig>) -> MetadataFingerprint {
    let mut h = StableHasher::new();
    let providers = cfg.map(|c| c.providers.as_slice()).unwrap_or_default();
    write_providers(&mut h, providers);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    // Lengths are always 64-bit so long strings and lists never truncate.
    fn write_len(&mut self, n: usize) {
        self.write_u64(n as u64);
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_len(s.len());
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> MetadataFingerprint {
        let v = self.inner.digest128();
        MetadataFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_module_metadata(h: &mut StableHasher, m: &ModuleMetadata) {
    write_components(h, &m.declarations);
    h.write_len(m.imports.len());
    for module in &m.imports {
        write_module_ref(h, module);
    }
    write_providers(h, &m.providers);
    write_components(h, &m.entry_components);
    h.write_len(m.schemas.len());
    for s in &m.schemas {
        h.write_str(s);
    }
}

fn write_components(h: &mut StableHasher, components: &[ComponentRef]) {
    h.write_len(components.len());
    for c in components {
        write_component(h, c);
    }
}

fn write_component(h: &mut StableHasher, c: &ComponentRef) {
    h.write_str(&c.name);
    h.write_str(&c.selector);
    h.write_len(c.inputs.len());
    for i in &c.inputs {
        h.write_str(i);
    }
    h.write_len(c.outputs.len());
    for o in &c.outputs {
        h.write_str(o);
    }
    h.write_bool(c.standalone);
}

fn write_module_ref(h: &mut StableHasher, m: &ModuleRef) {
    h.write_str(&m.name);
    write_components(h, &m.exports);
    h.write_len(m.imports.len());
    for nested in &m.imports {
        write_module_ref(h, nested);
    }
    write_providers(h, &m.providers);
}

fn write_providers(h: &mut StableHasher, providers: &[Provider]) {
    h.write_len(providers.len());
    for p in providers {
        h.write_str(&p.token);
        write_value(h, &p.value);
    }
}

fn write_value(h: &mut StableHasher, v: &Value) {
    match v {
        Value::Null => h.write_u8(0),
        Value::Bool(b) => {
            h.write_u8(1);
            h.write_bool(*b);
        }
        Value::Number(n) => {
            h.write_u8(2);
            if let Some(i) = n.as_i64() {
                h.write_u8(0);
                h.write_u64(i as u64);
            } else if let Some(u) = n.as_u64() {
                h.write_u8(1);
                h.write_u64(u);
            } else {
                h.write_u8(2);
                h.write_f64(n.as_f64().unwrap_or_default());
            }
        }
        Value::String(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        Value::Array(items) => {
            h.write_u8(4);
            h.write_len(items.len());
            for item in items {
                write_value(h, item);
            }
        }
        Value::Object(map) => {
            // serde_json maps iterate in key order, so this is stable.
            h.write_u8(5);
            h.write_len(map.len());
            for (k, item) in map {
                h.write_str(k);
                write_value(h, item);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/fingerprint.rs"]
mod tests;
