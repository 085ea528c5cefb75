//! Mapping of trampoline outcomes onto process exit statuses.

use gantry_config::VariantProfile;

use crate::trampoline::TrampolineError;

/// Maps a trampoline outcome onto the exit status for `variant`.
///
/// The entry point returning takes the variant's "entry returned"
/// status; any bootstrap failure takes the variant's failure status.
/// The host's supervisor reads nothing else from the worker.
#[must_use]
pub fn exit_status(outcome: &Result<(), TrampolineError>, variant: &VariantProfile) -> u8 {
    match outcome {
        Ok(()) => variant.on_return(),
        Err(_) => variant.on_failure(),
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use gantry_config::VariantProfile;
    use rstest::rstest;

    use super::exit_status;
    use crate::trampoline::TrampolineError;

    fn open_failed() -> Result<(), TrampolineError> {
        Err(TrampolineError::OpenFailed {
            path: Utf8PathBuf::from("/opt/pg/lib/ferretdb.so"),
            message: String::from("no such file"),
            source: None,
        })
    }

    #[rstest]
    #[case::managed(VariantProfile::managed(), 1)]
    #[case::oneshot(VariantProfile::oneshot(), 0)]
    fn entry_return_maps_to_the_variant_status(
        #[case] profile: VariantProfile,
        #[case] expected: u8,
    ) {
        assert_eq!(exit_status(&Ok(()), &profile), expected);
    }

    #[rstest]
    #[case::managed(VariantProfile::managed())]
    #[case::oneshot(VariantProfile::oneshot())]
    fn failures_map_to_the_failure_status(#[case] profile: VariantProfile) {
        assert_eq!(exit_status(&open_failed(), &profile), 1);
    }
}
