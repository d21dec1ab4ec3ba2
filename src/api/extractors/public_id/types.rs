/*
 * Responsibility
 * - リソースごとの「意味付き ID 型」を宣言する
 * - decode ロジックや extractor 実装は core 側
 */
use super::core::PublicId;

// notes
pub enum NoteTag {}
pub type PublicNoteId = PublicId<NoteTag>;
