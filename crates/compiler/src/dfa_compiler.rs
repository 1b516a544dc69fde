use std::time::Instant;

use log::debug;
use log::info;
use tokn_automata::DfaFilter;
use tokn_automata::NfaToDfa;

use crate::CompiledDfa;
use crate::DefinitionError;
use crate::TokenDefinitions;
use crate::combine_token_nfas;

/// Options that influence the compilation of token definitions.
#[derive(Clone, Debug, Default)]
pub struct CompilerOptions {
    /// Reject definitions in which some token is never recognized, for
    /// example a keyword defined before an identifier pattern that includes
    /// it.
    pub reject_redundant_tokens: bool,
}

/// Compiles validated token definitions into a minimal automaton.
pub struct DfaCompiler {
    options: CompilerOptions,
    converter: NfaToDfa,
}

impl DfaCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            converter: NfaToDfa::new(),
        }
    }

    /// Applies the given filter to the minimized automaton of every compilation.
    pub fn with_filter(mut self, filter: Box<dyn DfaFilter>) -> Self {
        self.converter = NfaToDfa::with_filter(filter);
        self
    }

    /// Compiles the tokens of the definitions into a single minimal automaton.
    pub fn compile(&mut self, definitions: &TokenDefinitions) -> Result<CompiledDfa, DefinitionError> {
        if definitions.num_of_tokens() == 0 {
            return Err(DefinitionError::NoTokens);
        }

        info!("Compiling {} tokens", definitions.num_of_tokens());
        let start = Instant::now();

        let nfa = combine_token_nfas(definitions);
        let dfa = self.converter.convert(&nfa);

        let token_names = definitions.tokens().map(|entry| entry.name.clone()).collect();
        let compiled = CompiledDfa::new(dfa, token_names);

        if self.options.reject_redundant_tokens {
            let redundant = redundant_tokens(&compiled);
            if !redundant.is_empty() {
                return Err(DefinitionError::RedundantTokens(redundant));
            }
        }

        debug!("Time compile: {:.3}s", start.elapsed().as_secs_f64());
        Ok(compiled)
    }
}

impl Default for DfaCompiler {
    fn default() -> Self {
        Self::new(CompilerOptions::default())
    }
}

/// Returns the names of the tokens that are not recognized in any state, in
/// order of definition.
fn redundant_tokens(compiled: &CompiledDfa) -> Vec<String> {
    let mut recognized = vec![false; compiled.token_names().len()];
    for state_index in compiled.automaton().iter_states() {
        if let Some(id) = compiled.recognized_token(state_index) {
            recognized[*id] = true;
        }
    }

    compiled
        .token_names()
        .iter()
        .zip(recognized)
        .filter(|(_, recognized)| !recognized)
        .map(|(name, _)| name.clone())
        .collect()
}
