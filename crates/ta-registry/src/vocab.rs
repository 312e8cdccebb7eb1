//! The verb table: command words → candidate handlers in precedence order.

use std::collections::BTreeMap;

use ta_behavior::VerbDecl;
use ta_core::Tier;

/// One module offering to answer a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbCandidate {
    /// Load index of the declaring module.
    pub module:          usize,
    pub tier:            Tier,
    /// Command callable to invoke in that module.
    pub event:           String,
    /// The canonical word of the declaration (the word itself for a verb,
    /// the verb it belongs to for a synonym).
    pub canonical:       String,
    pub object_required: bool,
}

/// What the parser layer needs to know about a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerbInfo<'a> {
    pub word:            &'a str,
    pub object_required: bool,
}

/// Words (verbs and synonyms) indexed case-insensitively.
///
/// Candidates for a word are sorted by `(tier, load index)`: tier 1 first,
/// and within a tier the module loaded first.  A module that declares the
/// same word twice contributes only its first declaration.
#[derive(Debug, Default)]
pub struct VerbTable {
    words: BTreeMap<String, Vec<VerbCandidate>>,
}

impl VerbTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every word of `decl` for the module at `module` / `tier`.
    pub fn declare(&mut self, module: usize, tier: Tier, decl: &VerbDecl) {
        for word in decl.words() {
            let list = self.words.entry(normalize(word)).or_default();
            if list.iter().any(|c| c.module == module) {
                continue;
            }
            list.push(VerbCandidate {
                module,
                tier,
                event:           decl.event.clone(),
                canonical:       decl.word.clone(),
                object_required: decl.object_required,
            });
        }
    }

    /// Sort every candidate list into precedence order.  Called once after
    /// all modules are declared.
    pub fn finish(&mut self) {
        for list in self.words.values_mut() {
            list.sort_by_key(|c| (c.tier, c.module));
        }
    }

    /// Candidates for `word`, highest precedence first.  Empty for unknown words.
    pub fn candidates(&self, word: &str) -> &[VerbCandidate] {
        self.words
            .get(&normalize(word))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parser-facing facts about `word`, taken from its highest-precedence
    /// declaration.
    pub fn info(&self, word: &str) -> Option<VerbInfo<'_>> {
        self.candidates(word).first().map(|c| VerbInfo {
            word:            c.canonical.as_str(),
            object_required: c.object_required,
        })
    }

    /// Every known word, in lexical order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_ascii_lowercase()
}
