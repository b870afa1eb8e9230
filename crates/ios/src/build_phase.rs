use symwiz_pbxproj::ShellScriptPhase;

pub const UPLOAD_PHASE_LABEL: &str = "Upload Debug Symbols to Sentry";

/// Body of the upload build phase for the given `sentry-cli` location.
#[must_use]
pub fn upload_script(cli_path: &str) -> String {
    format!(
        "if [ \"$SENTRY_SKIP_DSYM_UPLOAD\" = \"true\" ]; then\n  \
         echo \"SENTRY_SKIP_DSYM_UPLOAD=true, skipping debug symbol upload\"\n  \
         exit 0\n\
         fi\n\
         export SENTRY_PROPERTIES=sentry.properties\n\
         {} debug-files upload \"$DWARF_DSYM_FOLDER_PATH\"\n",
        cli_path.replace(' ', "\\ ")
    )
}

#[must_use]
pub fn upload_phase(cli_path: &str) -> ShellScriptPhase {
    ShellScriptPhase {
        label: UPLOAD_PHASE_LABEL.to_string(),
        shell_path: "/bin/sh".to_string(),
        script: upload_script(cli_path),
    }
}
