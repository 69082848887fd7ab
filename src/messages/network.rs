//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::media::AvatarFile;
use crate::models::{
    AuthSession, CreateUserRequest, Exercise, HistoryDay, SignInRequest, UpdateProfileRequest, User,
};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Bearer token for every following request (`None` after sign-out)
    SetToken(Option<String>),

    // Auth
    /// `POST /sessions`
    SignIn {
        id: u64,
        request: SignInRequest,
    },
    /// `POST /users`, then `POST /sessions` with the same credentials
    SignUp {
        id: u64,
        request: CreateUserRequest,
    },

    // Exercises
    FetchGroups {
        id: u64,
    },
    FetchExercises {
        id: u64,
        group: String,
    },
    FetchExercise {
        id: u64,
        exercise_id: String,
    },

    // History
    RegisterHistory {
        id: u64,
        exercise_id: String,
    },
    FetchHistory {
        id: u64,
    },

    // Profile
    UpdateProfile {
        id: u64,
        request: UpdateProfileRequest,
    },
    UploadAvatar {
        id: u64,
        avatar: AvatarFile,
    },

    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Request id, if this command performs a request
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkCommand::SignIn { id, .. }
            | NetworkCommand::SignUp { id, .. }
            | NetworkCommand::FetchGroups { id }
            | NetworkCommand::FetchExercises { id, .. }
            | NetworkCommand::FetchExercise { id, .. }
            | NetworkCommand::RegisterHistory { id, .. }
            | NetworkCommand::FetchHistory { id }
            | NetworkCommand::UpdateProfile { id, .. }
            | NetworkCommand::UploadAvatar { id, .. } => Some(*id),
            NetworkCommand::SetToken(_) | NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    SignedIn {
        id: u64,
        result: Result<AuthSession, ApiError>,
    },
    SignedUp {
        id: u64,
        result: Result<AuthSession, ApiError>,
    },
    Groups {
        id: u64,
        result: Result<Vec<String>, ApiError>,
    },
    Exercises {
        id: u64,
        result: Result<Vec<Exercise>, ApiError>,
    },
    ExerciseDetails {
        id: u64,
        result: Result<Exercise, ApiError>,
    },
    HistoryRegistered {
        id: u64,
        result: Result<(), ApiError>,
    },
    History {
        id: u64,
        result: Result<Vec<HistoryDay>, ApiError>,
    },
    ProfileUpdated {
        id: u64,
        result: Result<(), ApiError>,
    },
    /// Carries the updated user with its new avatar reference
    AvatarUploaded {
        id: u64,
        result: Result<User, ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::SignedIn { id, .. } => *id,
            NetworkResponse::SignedUp { id, .. } => *id,
            NetworkResponse::Groups { id, .. } => *id,
            NetworkResponse::Exercises { id, .. } => *id,
            NetworkResponse::ExerciseDetails { id, .. } => *id,
            NetworkResponse::HistoryRegistered { id, .. } => *id,
            NetworkResponse::History { id, .. } => *id,
            NetworkResponse::ProfileUpdated { id, .. } => *id,
            NetworkResponse::AvatarUploaded { id, .. } => *id,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            NetworkResponse::SignedIn { result, .. } | NetworkResponse::SignedUp { result, .. } => {
                result.is_ok()
            }
            NetworkResponse::Groups { result, .. } => result.is_ok(),
            NetworkResponse::Exercises { result, .. } => result.is_ok(),
            NetworkResponse::ExerciseDetails { result, .. } => result.is_ok(),
            NetworkResponse::HistoryRegistered { result, .. }
            | NetworkResponse::ProfileUpdated { result, .. } => result.is_ok(),
            NetworkResponse::History { result, .. } => result.is_ok(),
            NetworkResponse::AvatarUploaded { result, .. } => result.is_ok(),
        }
    }
}
