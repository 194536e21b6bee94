//! Conda-forge install block — micromamba bootstrap into an isolated prefix.
//!
//! The environment is pinned to a fixed interpreter version so rebuilding the
//! recipe later cannot drift to a different Python.

/// Interpreter pin for the provisioned environment.
pub const PYTHON_PIN: &str = "python=3.12";

/// Render the Dockerfile block provisioning the given conda-forge packages.
pub fn install_block(requirements: &[String]) -> String {
    if requirements.is_empty() {
        return "# No conda dependencies!".to_string();
    }
    let joined = requirements.join(" ");
    format!(
        "RUN mkdir /micromamba\n\
         RUN curl -Ls https://micro.mamba.pm/api/micromamba/linux-64/latest | tar -xvj bin/micromamba\n\
         RUN mv bin/micromamba /usr/local/bin/\n\
         RUN micromamba create -y -p /opt/conda -c conda-forge {joined} {PYTHON_PIN}\n\
         ENV PATH=/opt/conda/bin:$PATH"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_renders_comment() {
        assert_eq!(install_block(&[]), "# No conda dependencies!");
    }

    #[test]
    fn test_block_provisions_environment() {
        let deps = vec!["readdy".to_string(), "smoldyn=2.73".to_string()];
        let block = install_block(&deps);
        assert!(block.contains("micromamba create -y -p /opt/conda -c conda-forge readdy smoldyn=2.73 python=3.12"));
        assert!(block.contains("ENV PATH=/opt/conda/bin:$PATH"));
        assert!(block.starts_with("RUN mkdir /micromamba"));
    }

    #[test]
    fn test_packages_are_space_joined_unquoted() {
        let block = install_block(&["readdy".to_string()]);
        assert!(block.contains(" readdy python=3.12"));
        assert!(!block.contains("'readdy'"));
    }
}
