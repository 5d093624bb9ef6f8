//! Compile configuration use case.

use keyforge_domain::compilation::{
    CompilationResult, EnvironmentCompilationInfo, StructureCompilationInfo, TraceResult,
};
use keyforge_domain::settings::CompilerSettings;
use tracing::debug;

use crate::compiler::{ConfigurationCompiler, ReferenceParser};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{NoSecrets, SecretLookup};

/// Input for compiling a structure.
#[derive(Debug, Clone)]
pub struct CompileConfigurationInput {
    /// The environment selected for this compilation.
    pub environment: EnvironmentCompilationInfo,
    /// Optional environment layered underneath `environment`.
    pub default_environment: Option<EnvironmentCompilationInfo>,
    /// The structure to compile.
    pub structure: StructureCompilationInfo,
}

/// Output of a compilation.
#[derive(Debug, Clone)]
pub struct CompileConfigurationOutput {
    /// The compiled structure.
    pub result: CompilationResult,
    /// Trace of layering the environment over the default one. Empty when
    /// no default environment was given.
    pub environment_trace: Vec<TraceResult>,
    /// True if no warnings or errors were recorded in either pass.
    pub is_clean: bool,
}

/// Use case for compiling a structure, optionally over layered environments.
pub struct CompileConfiguration<S = NoSecrets> {
    compiler: ConfigurationCompiler<ReferenceParser, S>,
}

impl CompileConfiguration {
    /// Creates the use case without secrets and with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            compiler: ConfigurationCompiler::new(),
        }
    }
}

impl Default for CompileConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SecretLookup> CompileConfiguration<S> {
    /// Creates the use case around an existing compiler.
    #[must_use]
    pub const fn with_compiler(compiler: ConfigurationCompiler<ReferenceParser, S>) -> Self {
        Self { compiler }
    }

    /// Creates the use case from secrets and a JSON settings document.
    ///
    /// # Errors
    /// Returns an error if the settings document is invalid.
    pub fn from_settings_json(secrets: S, settings_json: &str) -> ApplicationResult<Self> {
        let settings = CompilerSettings::from_json(settings_json)?;
        Ok(Self {
            compiler: ConfigurationCompiler::new()
                .with_secrets(secrets)
                .with_settings(settings),
        })
    }

    /// Compiles the structure.
    ///
    /// With a default environment, compilation runs in two passes. The
    /// selected environment is first compiled as if it were a structure,
    /// seeing its own keys laid over the default ones. Its compiled keys
    /// then replace all of its original keys in the default environment and
    /// the structure is compiled against that merged map.
    ///
    /// # Errors
    /// Returns [`ApplicationError::InvalidInput`] if the structure or an
    /// environment has an empty name.
    pub fn execute(
        &self,
        input: CompileConfigurationInput,
    ) -> ApplicationResult<CompileConfigurationOutput> {
        validate_name("structure", &input.structure.name)?;
        validate_name("environment", &input.environment.name)?;

        let (environment, environment_trace) = match input.default_environment {
            Some(default) => {
                validate_name("default environment", &default.name)?;
                self.layer(&default, &input.environment, &input.structure)
            }
            None => (input.environment, Vec::new()),
        };

        let result = self.compiler.compile(&environment, &input.structure);
        let is_clean = !result
            .trace
            .iter()
            .chain(&environment_trace)
            .any(TraceResult::has_diagnostics);

        Ok(CompileConfigurationOutput {
            result,
            environment_trace,
            is_clean,
        })
    }

    fn layer(
        &self,
        default: &EnvironmentCompilationInfo,
        environment: &EnvironmentCompilationInfo,
        structure: &StructureCompilationInfo,
    ) -> (EnvironmentCompilationInfo, Vec<TraceResult>) {
        debug!(
            environment = %environment.name,
            default = %default.name,
            "layering environment over default"
        );

        let visible = default.overlay(environment.name.clone(), &environment.keys);
        let as_structure = StructureCompilationInfo::new(
            environment.name.clone(),
            environment.keys.clone(),
            structure.variables.clone(),
        );
        let layered = self.compiler.compile(&visible, &as_structure);

        // Keys of the selected environment are replaced wholesale by their
        // compiled form, which may have been expanded or dropped.
        let mut keys = default.keys.clone();
        keys.retain(|key, _| !environment.keys.contains_key(key));
        keys.extend(layered.compiled_configuration);
        let merged = EnvironmentCompilationInfo::new(environment.name.clone(), keys);
        (merged, layered.trace)
    }
}

fn validate_name(what: &str, name: &str) -> ApplicationResult<()> {
    if name.trim().is_empty() {
        return Err(ApplicationError::InvalidInput(format!(
            "{what} name cannot be empty"
        )));
    }
    Ok(())
}
