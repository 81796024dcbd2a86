//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuCheck as Check, LuChevronDown as ChevronDown, LuChevronRight as ChevronRight,
        LuCopy as Copy, LuDownload as Download, LuEye as Eye, LuEyeOff as EyeOff, LuFile as File,
        LuFileText as FileText, LuFolder as Folder, LuFolderOpen as FolderOpen,
        LuHistory as History, LuImage as FileImage, LuInfo as Info, LuLoader as Loader,
        LuLock as Lock, LuLogOut as Logout, LuMusic as FileAudio, LuRotateCcw as Restore,
        LuSearch as Search, LuSend as Send, LuTrash2 as Trash, LuVideo as FileVideo,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowCounterclockwise as Restore, BsArrowRepeat as Loader, BsBoxArrowRight as Logout,
        BsCheckLg as Check, BsChevronDown as ChevronDown, BsChevronRight as ChevronRight,
        BsClipboard as Copy, BsClockHistory as History, BsDownload as Download, BsEye as Eye,
        BsEyeSlash as EyeOff, BsFileEarmark as File, BsFileEarmarkImage as FileImage,
        BsFileEarmarkMusic as FileAudio, BsFileEarmarkPlay as FileVideo,
        BsFileEarmarkText as FileText, BsFolder2Open as FolderOpen, BsFolderFill as Folder,
        BsInfoCircle as Info, BsLockFill as Lock, BsSearch as Search, BsSend as Send,
        BsTrash as Trash, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE, File);
themed_icon!(FILE_AUDIO, FileAudio);
themed_icon!(FILE_VIDEO, FileVideo);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(SEARCH, Search);
themed_icon!(CLOSE, Close);
themed_icon!(CHECK, Check);
themed_icon!(COPY, Copy);
themed_icon!(DOWNLOAD, Download);
themed_icon!(HISTORY, History);
themed_icon!(TRASH, Trash);
themed_icon!(RESTORE, Restore);
themed_icon!(SEND, Send);
themed_icon!(EYE, Eye);
themed_icon!(EYE_OFF, EyeOff);
themed_icon!(LOCK, Lock);
themed_icon!(LOGOUT, Logout);
themed_icon!(LOADER, Loader);
themed_icon!(INFO, Info);
