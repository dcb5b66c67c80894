//! Destination planning: one sequential pass over the walked files, in walk
//! order, before any copy is dispatched.
//!
//! Every destination path is chosen here, so the result of a run does not
//! depend on which copy task happens to run first, and no two copies in a
//! run ever write the same path.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::bucket::bucket_for;
use super::collision::{resolve, CollisionPolicy, Resolution};
use super::error::CopyError;

/// One source file and what the run will do with it.
#[derive(Debug)]
pub struct PlannedCopy {
    pub source: PathBuf,
    /// `<output_root>/<bucket>`; created on demand by the copy.
    pub bucket_dir: PathBuf,
    /// Chosen destination, or the reason none could be chosen.
    pub resolution: Result<Resolution, CopyError>,
}

/// Plan destinations for `files` under `output_root`. Blocking (may stat and
/// hash existing destinations); run it on the blocking pool.
///
/// Within one run, same-named files resolve in input order: under `skip` the
/// first one is copied, under `rename` the first one gets the plain name, and
/// under `overwrite` the last one is written and earlier ones are marked
/// [`Resolution::Superseded`].
pub fn plan_copies(
    output_root: &Path,
    policy: CollisionPolicy,
    files: Vec<PathBuf>,
) -> Vec<PlannedCopy> {
    let mut plans: Vec<PlannedCopy> = Vec::with_capacity(files.len());
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    // Destination -> index of the plan currently writing it.
    let mut writers: HashMap<PathBuf, usize> = HashMap::new();

    for source in files {
        let bucket_dir = output_root.join(bucket_for(&source));
        let resolution = match source.file_name() {
            Some(name) => resolve(policy, &source, &bucket_dir.join(name), &claimed),
            None => Err(CopyError::NoFileName(source.clone())),
        };

        match &resolution {
            Ok(Resolution::Write(path)) => {
                if let Some(earlier) = writers.insert(path.clone(), plans.len()) {
                    tracing::warn!(
                        "{} is written by {} and {}; keeping the later file",
                        path.display(),
                        plans[earlier].source.display(),
                        source.display()
                    );
                    plans[earlier].resolution = Ok(Resolution::Superseded(path.clone()));
                }
                claimed.insert(path.clone());
            }
            Ok(Resolution::Unchanged(path)) => {
                claimed.insert(path.clone());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("cannot place {}: {}", source.display(), e),
        }

        plans.push(PlannedCopy {
            source,
            bucket_dir,
            resolution,
        });
    }
    plans
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `one/<name>` and `two/<name>` with different contents.
    fn same_named_pair(root: &Path, name: &str) -> Vec<PathBuf> {
        let first = root.join("one").join(name);
        let second = root.join("two").join(name);
        std::fs::create_dir_all(root.join("one")).unwrap();
        std::fs::create_dir_all(root.join("two")).unwrap();
        std::fs::write(&first, b"first").unwrap();
        std::fs::write(&second, b"second").unwrap();
        vec![first, second]
    }

    fn resolutions(plans: &[PlannedCopy]) -> Vec<&Resolution> {
        plans
            .iter()
            .map(|p| p.resolution.as_ref().unwrap())
            .collect()
    }

    #[test]
    fn rename_gives_plain_name_to_first_in_order() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let files = same_named_pair(src.path(), "a.txt");

        let plans = plan_copies(out.path(), CollisionPolicy::Rename, files);
        assert_eq!(
            resolutions(&plans),
            vec![
                &Resolution::Write(out.path().join("txt/a.txt")),
                &Resolution::Write(out.path().join("txt/a_1.txt")),
            ]
        );
    }

    #[test]
    fn skip_copies_first_and_skips_the_rest() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let files = same_named_pair(src.path(), "a.txt");

        let plans = plan_copies(out.path(), CollisionPolicy::Skip, files);
        let dest = out.path().join("txt/a.txt");
        assert_eq!(
            resolutions(&plans),
            vec![&Resolution::Write(dest.clone()), &Resolution::Skip(dest)]
        );
    }

    #[test]
    fn overwrite_keeps_only_the_last_writer() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let files = same_named_pair(src.path(), "data.bin");

        let plans = plan_copies(out.path(), CollisionPolicy::Overwrite, files);
        let dest = out.path().join("bin/data.bin");
        assert_eq!(
            resolutions(&plans),
            vec![&Resolution::Superseded(dest.clone()), &Resolution::Write(dest)]
        );
    }

    #[test]
    fn path_without_file_name_is_an_item_error() {
        let out = tempfile::tempdir().unwrap();
        let plans = plan_copies(out.path(), CollisionPolicy::Overwrite, vec![PathBuf::from("/")]);
        assert!(matches!(
            plans[0].resolution,
            Err(CopyError::NoFileName(_))
        ));
        assert_eq!(plans[0].bucket_dir, out.path().join("no_extension"));
    }
}
