//! Configuration and system parameters

use crate::benchmark::BenchConfig;

/// Lane width of the vectorized flow kernels
///
/// Sixteen `f32` lanes fill one 512-bit register.
pub const LANE_WIDTH: usize = 16;

/// The host architecture, used to report native vector width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Architecture {
    /// Intel/AMD x86_64 with AVX-512 support
    X86WithAVX512,
    /// Intel/AMD x86_64 without AVX-512 support
    X86WithoutAVX512,
    /// ARM architecture with NEON support (e.g., Apple Silicon)
    ArmNeon,
    /// Generic implementation for any architecture
    Generic,
}

impl Architecture {
    /// Get the vector width in bytes for this architecture
    pub fn vector_width_bytes(&self) -> usize {
        match self {
            Architecture::X86WithAVX512 => 64,    // 512 bits
            Architecture::X86WithoutAVX512 => 32, // 256 bits (AVX2)
            Architecture::ArmNeon => 16,          // 128 bits
            Architecture::Generic => 8,           // Scalar
        }
    }

    /// Number of `T` elements one native vector register holds
    pub fn native_lanes<T>(&self) -> usize {
        (self.vector_width_bytes() / std::mem::size_of::<T>()).max(1)
    }
}

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads the row-parallel kernel uses
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(),
        }
    }
}

/// Configuration for a benchmark run
///
/// The vectorized kernels always run [`LANE_WIDTH`] lanes; it is a
/// compile-time constant, not a setting.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// System parameters for performance tuning
    pub system_params: SystemParameters,

    /// Timing parameters
    pub bench: BenchConfig,

    /// Detected host architecture
    pub architecture: Architecture,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            bench: BenchConfig::default(),
            architecture: detect_architecture(),
        }
    }
}

impl FlowConfig {
    /// Overrides the worker thread count
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.system_params.n_threads = n_threads.max(1);
        self
    }
}

/// Detects the current CPU architecture
pub fn detect_architecture() -> Architecture {
    #[cfg(all(target_arch = "aarch64", target_os = "macos"))]
    {
        // Apple Silicon always has NEON
        return Architecture::ArmNeon;
    }

    #[cfg(target_arch = "x86_64")]
    {
        #[cfg(target_feature = "avx512f")]
        {
            return Architecture::X86WithAVX512;
        }
        #[cfg(not(target_feature = "avx512f"))]
        {
            // Runtime detection for x86
            if std::is_x86_feature_detected!("avx512f") {
                return Architecture::X86WithAVX512;
            } else {
                return Architecture::X86WithoutAVX512;
            }
        }
    }

    #[cfg(all(target_arch = "aarch64", not(target_os = "macos")))]
    {
        return Architecture::ArmNeon;
    }

    // Fallback for other architectures
    #[allow(unreachable_code)]
    Architecture::Generic
}
