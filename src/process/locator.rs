//! Finds the first running process that belongs to a catalog target

use crate::catalog::{Catalog, TargetDescriptor};
use crate::core::types::{MemoryError, MemoryResult, ProcessId};
use crate::memory::access::ProcessPlatform;
use tracing::{debug, warn};

/// A matched, opened game process.
///
/// Owns the process handle; dropping the value releases it. Never kept
/// across polling iterations.
#[derive(Debug)]
pub struct ResolvedProcess<'c, H> {
    pub handle: H,
    pub pid: ProcessId,
    pub target: &'c TargetDescriptor,
}

/// Scans running processes against a catalog
pub struct ProcessLocator<'a, P: ProcessPlatform + ?Sized> {
    platform: &'a P,
    catalog: &'a Catalog,
}

impl<'a, P: ProcessPlatform + ?Sized> ProcessLocator<'a, P> {
    pub fn new(platform: &'a P, catalog: &'a Catalog) -> Self {
        ProcessLocator { platform, catalog }
    }

    /// Opens the first catalog match in enumeration order.
    ///
    /// A match that cannot be opened is logged and skipped; the scan goes on.
    pub fn locate(&self) -> MemoryResult<ResolvedProcess<'a, P::Handle>> {
        let processes = self.platform.processes()?;

        for process in processes {
            let Some(target) = self.catalog.find_by_process_name(&process.name) else {
                continue;
            };

            match self.platform.open_process(process.pid) {
                Ok(handle) => {
                    debug!(game = %target.name, pid = process.pid, "Opened game process");
                    return Ok(ResolvedProcess {
                        handle,
                        pid: process.pid,
                        target,
                    });
                }
                Err(error) => {
                    warn!(
                        game = %target.name,
                        pid = process.pid,
                        %error,
                        "Found game but could not open process"
                    );
                }
            }
        }

        Err(MemoryError::NoSupportedProcessFound)
    }
}
