// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod elevenlabs;
pub mod supabase;

pub use elevenlabs::{ElevenLabsClient, VoiceDiagnostics};
pub use supabase::SupabaseStore;
