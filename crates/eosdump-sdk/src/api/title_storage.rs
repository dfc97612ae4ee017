//! Remote file storage feature group (optional).

use std::ffi::c_void;
use std::ptr;
use std::sync::Arc;
use std::sync::atomic::{AtomicPtr, Ordering};

use parking_lot::Mutex;

use super::{complete_simple, cstring};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    TITLESTORAGE_COPYFILEMETADATAATINDEX_API_LATEST,
    TITLESTORAGE_COPYFILEMETADATABYFILENAME_API_LATEST,
    TITLESTORAGE_GETFILEMETADATACOUNT_API_LATEST, TITLESTORAGE_QUERYFILE_API_LATEST,
    TITLESTORAGE_QUERYFILELIST_API_LATEST, TITLESTORAGE_READFILE_API_LATEST,
    TitleStorageCopyFileMetadataAtIndexOptions, TitleStorageCopyFileMetadataByFilenameOptions,
    TitleStorageGetFileMetadataCountOptions, TitleStorageQueryFileListOptions,
    TitleStorageQueryFileOptions, TitleStorageReadFileOptions,
};
use crate::ffi::records::{
    FileMetadataRecord, ReadFileDataCallbackInfo, TitleStorageQueryFileCallbackInfo,
    TitleStorageQueryFileListCallbackInfo, TitleStorageReadFileCallbackInfo,
};
use crate::ffi::{HTitleStorage, ProductUserId, TitleStorageReadResult, owned_or_empty};
use crate::model::FileMetadata;
use crate::shim::{ArmedCallback, CallbackHeader};
use crate::wait::{ResultSlot, SlotCompleter, ValueSlot, WaitPolicy};

/// Symbol whose absence disables this whole group.
const INTERFACE_SYMBOL: &str = "EOS_Platform_GetTitleStorageInterface";

/// Chunk size requested per read callback.
const READ_CHUNK_LEN: u32 = 65536;

pub struct TitleStorage<'a> {
    fns: &'a SdkFns,
    handle: HTitleStorage,
}

impl<'a> TitleStorage<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HTitleStorage) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null() && self.fns.title_storage.query_file.is_some()
    }

    fn entry<F: Copy>(&self, slot: Option<F>, symbol: &'static str) -> Result<F, SdkError> {
        if self.handle.is_null() {
            return Err(SdkError::FeatureUnavailable {
                symbol: INTERFACE_SYMBOL,
            });
        }
        slot.ok_or(SdkError::FeatureUnavailable { symbol })
    }

    /// Ask the backend for one file's metadata.
    pub fn query_file(
        &self,
        user: ProductUserId,
        filename: &str,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_TitleStorage_QueryFile";
        let query = self.entry(self.fns.title_storage.query_file, OPERATION)?;
        let filename = cstring(filename, OPERATION)?;

        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed = ArmedCallback::new(move |info: &TitleStorageQueryFileCallbackInfo| {
            completer.complete(info.result_code);
        });

        let options = TitleStorageQueryFileOptions {
            api_version: TITLESTORAGE_QUERYFILE_API_LATEST,
            local_user_id: user,
            filename: filename.as_ptr(),
        };

        tracing::trace!("querying title storage file");
        // SAFETY: options and the filename outlive the call; the shim owns
        // the continuation.
        unsafe { query(self.handle, &options, armed.client_data(), armed.notify()) };
        armed.commit();
        complete_simple(self.fns, OPERATION, &slot, policy)
    }

    /// Ask the backend for the full file list; returns the file count.
    pub fn query_file_list(
        &self,
        user: ProductUserId,
        policy: &WaitPolicy,
    ) -> Result<u32, SdkError> {
        const OPERATION: &str = "EOS_TitleStorage_QueryFileList";
        let query = self.entry(self.fns.title_storage.query_file_list, OPERATION)?;

        let slot = ResultSlot::new(OPERATION);
        let count: ValueSlot<u32> = ValueSlot::new();
        let completer = slot.completer();
        let count_out = count.clone();
        let armed = ArmedCallback::new(move |info: &TitleStorageQueryFileListCallbackInfo| {
            count_out.set(info.file_count);
            completer.complete(info.result_code);
        });

        let options = TitleStorageQueryFileListOptions {
            api_version: TITLESTORAGE_QUERYFILELIST_API_LATEST,
            local_user_id: user,
        };

        // SAFETY: options outlive the call; the shim owns the continuation.
        unsafe { query(self.handle, &options, armed.client_data(), armed.notify()) };
        armed.commit();
        complete_simple(self.fns, OPERATION, &slot, policy)?;
        Ok(count.take().unwrap_or(0))
    }

    pub fn file_metadata_count(&self, user: ProductUserId) -> Result<u32, SdkError> {
        let count = self.entry(
            self.fns.title_storage.get_file_metadata_count,
            "EOS_TitleStorage_GetFileMetadataCount",
        )?;
        let options = TitleStorageGetFileMetadataCountOptions {
            api_version: TITLESTORAGE_GETFILEMETADATACOUNT_API_LATEST,
            local_user_id: user,
        };
        // SAFETY: plain counter over the cached query result.
        Ok(unsafe { count(self.handle, &options) })
    }

    pub fn file_metadata_at(
        &self,
        user: ProductUserId,
        index: u32,
    ) -> Result<FileMetadata, SdkError> {
        const OPERATION: &str = "EOS_TitleStorage_CopyFileMetadataAtIndex";
        let copy = self.entry(self.fns.title_storage.copy_file_metadata_at_index, OPERATION)?;

        let options = TitleStorageCopyFileMetadataAtIndexOptions {
            api_version: TITLESTORAGE_COPYFILEMETADATAATINDEX_API_LATEST,
            local_user_id: user,
            index,
        };
        let mut record: *mut FileMetadataRecord = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below when the module exports a release entry point.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let metadata = unsafe {
            FileMetadata {
                filename: owned_or_empty((*record).filename),
                file_size_bytes: (*record).file_size_bytes,
                md5_hash: owned_or_empty((*record).md5_hash),
            }
        };
        if let Some(release) = self.fns.title_storage.file_metadata_release {
            // SAFETY: record came from the matching copy call.
            unsafe { release(record) };
        }
        Ok(metadata)
    }

    pub fn file_metadata(
        &self,
        user: ProductUserId,
        filename: &str,
    ) -> Result<FileMetadata, SdkError> {
        const OPERATION: &str = "EOS_TitleStorage_CopyFileMetadataByFilename";
        let copy = self.entry(
            self.fns.title_storage.copy_file_metadata_by_filename,
            OPERATION,
        )?;
        let filename = cstring(filename, OPERATION)?;

        let options = TitleStorageCopyFileMetadataByFilenameOptions {
            api_version: TITLESTORAGE_COPYFILEMETADATABYFILENAME_API_LATEST,
            local_user_id: user,
            filename: filename.as_ptr(),
        };
        let mut record: *mut FileMetadataRecord = ptr::null_mut();

        // SAFETY: as in file_metadata_at.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }
        // SAFETY: the record is valid until released.
        let metadata = unsafe {
            FileMetadata {
                filename: owned_or_empty((*record).filename),
                file_size_bytes: (*record).file_size_bytes,
                md5_hash: owned_or_empty((*record).md5_hash),
            }
        };
        if let Some(release) = self.fns.title_storage.file_metadata_release {
            // SAFETY: record came from the matching copy call.
            unsafe { release(record) };
        }
        Ok(metadata)
    }

    /// Download one file, collecting its chunks, and block until the
    /// transfer completes.
    pub fn read_file(
        &self,
        user: ProductUserId,
        filename: &str,
        policy: &WaitPolicy,
    ) -> Result<Vec<u8>, SdkError> {
        const OPERATION: &str = "EOS_TitleStorage_ReadFile";
        let read = self.entry(self.fns.title_storage.read_file, OPERATION)?;
        let filename = cstring(filename, OPERATION)?;

        let slot = ResultSlot::new(OPERATION);
        // The SDK hands the same client_data to both the per-chunk data
        // callback and the completion callback, so the context carries both
        // the sink and the completer; the one-shot shim does not fit here.
        let context = Arc::new(ReadContext {
            data: Mutex::new(Vec::new()),
            completer: slot.completer(),
        });

        let options = TitleStorageReadFileOptions {
            api_version: TITLESTORAGE_READFILE_API_LATEST,
            local_user_id: user,
            filename: filename.as_ptr(),
            read_chunk_length_bytes: READ_CHUNK_LEN,
            read_file_data_callback: read_chunk,
            file_transfer_progress_callback: ptr::null(),
        };

        tracing::trace!("reading title storage file");
        // SAFETY: options outlive the call; the context outlives the
        // transfer because this frame blocks until completion.
        let request = unsafe {
            read(
                self.handle,
                &options,
                Arc::as_ptr(&context) as *mut c_void,
                read_complete,
            )
        };

        let code = match slot.wait(policy) {
            Ok(code) => code,
            Err(err) => {
                // A deadline fired while the native transfer may still be
                // running; leak the context rather than let a late callback
                // touch freed memory.
                std::mem::forget(context);
                return Err(err);
            }
        };

        if !request.is_null() {
            if let Some(release) = self.fns.title_storage.transfer_request_release {
                // SAFETY: request handle came from the read call above.
                unsafe { release(request) };
            }
        }

        if !code.is_success() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }
        Ok(std::mem::take(&mut *context.data.lock()))
    }
}

struct ReadContext {
    data: Mutex<Vec<u8>>,
    completer: SlotCompleter,
}

/// Per-chunk data callback: append and keep reading.
unsafe extern "C" fn read_chunk(info: *const ReadFileDataCallbackInfo) -> TitleStorageReadResult {
    if info.is_null() {
        return TitleStorageReadResult::FailRequest;
    }
    // SAFETY: the payload is valid for the duration of the callback.
    let info = unsafe { &*info };
    if info.client_data.is_null() {
        return TitleStorageReadResult::FailRequest;
    }
    // SAFETY: client_data is the ReadContext the issuing frame keeps alive
    // until completion.
    let context = unsafe { &*(info.client_data as *const ReadContext) };
    if !info.data_chunk.is_null() && info.data_chunk_length_bytes > 0 {
        // SAFETY: the SDK advertises the chunk's length alongside it.
        let chunk = unsafe {
            std::slice::from_raw_parts(
                info.data_chunk as *const u8,
                info.data_chunk_length_bytes as usize,
            )
        };
        context.data.lock().extend_from_slice(chunk);
    }
    TitleStorageReadResult::ContinueReading
}

/// Completion callback: same clear-before-act discipline as the shim
/// trampoline, but the context is borrowed from the issuing frame instead of
/// owned.
unsafe extern "C" fn read_complete(info: *const TitleStorageReadFileCallbackInfo) {
    if info.is_null() {
        return;
    }
    // SAFETY: the payload starts with the standard completion header.
    let slot = unsafe {
        let header = info as *const CallbackHeader;
        AtomicPtr::from_ptr((&raw const (*header).client_data) as *mut *mut c_void)
    };
    let data = slot.swap(ptr::null_mut(), Ordering::AcqRel);
    if data.is_null() {
        return;
    }
    // SAFETY: non-null data is the issuing frame's ReadContext.
    let context = unsafe { &*(data as *const ReadContext) };
    // SAFETY: the payload is valid for the duration of the callback.
    context.completer.complete(unsafe { (*info).result_code });
}
