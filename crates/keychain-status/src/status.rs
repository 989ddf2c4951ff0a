//! The status table and its reverse lookup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Raw integer result code returned by the credential store
pub type StatusCode = i32;

status_table! {
    Success = 0 => "No error.",
    Unimplemented = -4 => "Function or operation not implemented.",
    Param = -50 => "One or more parameters passed to a function were not valid.",
    Allocate = -108 => "Failed to allocate memory.",
    NotAvailable = -25291 => "No keychain is available. You may need to restart your computer.",
    ReadOnly = -25292 => "This keychain cannot be modified.",
    AuthFailed = -25293 => "The user name or passphrase you entered is not correct.",
    NoSuchKeychain = -25294 => "The specified keychain could not be found.",
    InvalidKeychain = -25295 => "The specified keychain is not a valid keychain file.",
    DuplicateKeychain = -25296 => "A keychain with the same name already exists.",
    DuplicateCallback = -25297 => "The specified callback function is already installed.",
    InvalidCallback = -25298 => "The specified callback function is not valid.",
    DuplicateItem = -25299 => "The specified item already exists in the keychain.",
    ItemNotFound = -25300 => "The specified item could not be found in the keychain.",
    BufferTooSmall = -25301 => "There is not enough memory available to use the specified item.",
    DataTooLarge = -25302 => "This item contains information which is too large or in a format that cannot be displayed.",
    NoSuchAttr = -25303 => "The specified attribute does not exist.",
    InvalidItemRef = -25304 => "The specified item is no longer valid. It may have been deleted from the keychain.",
    InvalidSearchRef = -25305 => "Unable to search the current keychain.",
    NoSuchClass = -25306 => "The specified item does not appear to be a valid keychain item.",
    NoDefaultKeychain = -25307 => "A default keychain could not be found.",
    InteractionNotAllowed = -25308 => "User interaction is not allowed.",
    ReadOnlyAttr = -25309 => "The specified attribute could not be modified.",
    WrongSecVersion = -25310 => "This keychain was created by a different version of the system software and cannot be opened.",
    KeySizeNotAllowed = -25311 => "This item specifies a key size which is too large.",
    NoStorageModule = -25312 => "A required component (data storage module) could not be loaded. You may need to restart your computer.",
    NoCertificateModule = -25313 => "A required component (certificate module) could not be loaded. You may need to restart your computer.",
    NoPolicyModule = -25314 => "A required component (policy module) could not be loaded. You may need to restart your computer.",
    InteractionRequired = -25315 => "User interaction is required, but is currently not allowed.",
    DataNotAvailable = -25316 => "The contents of this item cannot be retrieved.",
    DataNotModifiable = -25317 => "The contents of this item cannot be modified.",
    CreateChainFailed = -25318 => "One or more certificates required to validate this certificate cannot be found.",
    InvalidPrefsDomain = -25319 => "The specified preferences domain is not valid.",
    AclNotSimple = -25240 => "The specified access control list is not in standard (simple) form.",
    PolicyNotFound = -25241 => "The specified policy cannot be found.",
    InvalidTrustSetting = -25242 => "The specified trust setting is invalid.",
    NoAccessForItem = -25243 => "The specified item has no access control.",
    InvalidOwnerEdit = -25244 => "Invalid attempt to change the owner of this item.",
    TrustNotAvailable = -25245 => "No trust results are available.",
    UnsupportedFormat = -25256 => "Import/Export format unsupported.",
    UnknownFormat = -25257 => "Unknown format in import.",
    KeyIsSensitive = -25258 => "Key material must be wrapped for export.",
    MultiplePrivKeys = -25259 => "An attempt was made to import multiple private keys.",
    PassphraseRequired = -25260 => "Passphrase is required for import/export.",
    InvalidPasswordRef = -25261 => "The password reference was invalid.",
    InvalidTrustSettings = -25262 => "The Trust Settings Record was corrupted.",
    NoTrustSettings = -25263 => "No Trust Settings were found.",
    Pkcs12VerifyFailure = -25264 => "MAC verification failed during PKCS12 import (wrong password?)",
    InvalidCertificate = -26265 => "This certificate could not be decoded.",
    NotSigner = -26267 => "A certificate was not signed by its proposed parent.",
    PolicyDenied = -26270 => "The certificate chain was not trusted due to a policy not accepting it.",
    InvalidKey = -26274 => "The provided key material was not valid.",
    Decode = -26275 => "Unable to decode the provided data.",
    Internal = -26276 => "An internal error occured in the Security framework.",
    UnsupportedAlgorithm = -26268 => "An unsupported algorithm was encountered.",
    UnsupportedOperation = -26271 => "The operation you requested is not supported by this key.",
    UnsupportedPadding = -26273 => "The padding you requested is not supported.",
    ItemInvalidKey = -34000 => "A string key in dictionary is not one of the supported keys.",
    ItemInvalidKeyType = -34001 => "A key in a dictionary is neither a CFStringRef nor a CFNumberRef.",
    ItemInvalidValue = -34002 => "A value in a dictionary is an invalid (or unsupported) CF type.",
    ItemClassMissing = -34003 => "No kSecItemClass key was specified in a dictionary.",
    ItemMatchUnsupported = -34004 => "The caller passed one or more kSecMatch keys to a function which does not support matches.",
    UseItemListUnsupported = -34005 => "The caller passed in a kSecUseItemList key to a function which does not support it.",
    UseKeychainUnsupported = -34006 => "The caller passed in a kSecUseKeychain key to a function which does not support it.",
    UseKeychainListUnsupported = -34007 => "The caller passed in a kSecUseKeychainList key to a function which does not support it.",
    ReturnDataUnsupported = -34008 => "The caller passed in a kSecReturnData key to a function which does not support it.",
    ReturnAttributesUnsupported = -34009 => "The caller passed in a kSecReturnAttributes key to a function which does not support it.",
    ReturnRefUnsupported = -34010 => "The caller passed in a kSecReturnRef key to a function which does not support it.",
    ReturnPersistentRefUnsupported = -34010 => "The caller passed in a kSecReturnPersistentRef key to a function which does not support it.",
    ValueRefUnsupported = -34012 => "The caller passed in a kSecValueRef key to a function which does not support it.",
    ValuePersistentRefUnsupported = -34013 => "The caller passed in a kSecValuePersistentRef key to a function which does not support it.",
    ReturnMissingPointer = -34014 => "The caller passed asked for something to be returned but did not pass in a result pointer.",
    MatchLimitUnsupported = -34015 => "The caller passed in a kSecMatchLimit key to a call which does not support limits.",
    ItemIllegalQuery = -34016 => "The caller passed in a query which contained too many keys.",
    WaitForCallback = -34017 => "This operation is incomplete, until the callback is invoked (not an error).",
    MissingEntitlement = -34018 => "Internal error when a required entitlement isn't present, client has neither application-identifier nor keychain-access-groups entitlements.",
    UpgradePending = -34019 => "Error returned if keychain database needs a schema migration but the device is locked, clients should wait for a device unlock notification and retry the command.",
    MpSignatureInvalid = -25327 => "Signature invalid on MP message",
    OtrTooOld = -25328 => "Message is too old to use",
    OtrIdTooNew = -25329 => "Key ID is too new to use! Message from the future?",
    ServiceNotAvailable = -67585 => "The required service is not available.",
    InsufficientClientId = -67586 => "The client ID is not correct.",
    DeviceReset = -67587 => "A device reset has occurred.",
    DeviceFailed = -67588 => "A device failure has occurred.",
    AppleAddAppAclSubject = -67589 => "Adding an application ACL subject failed.",
    ApplePublicKeyIncomplete = -67590 => "The public key is incomplete.",
    AppleSignatureMismatch = -67591 => "A signature mismatch has occurred.",
    AppleInvalidKeyStartDate = -67592 => "The specified key has an invalid start date.",
    AppleInvalidKeyEndDate = -67593 => "The specified key has an invalid end date.",
    ConversionError = -67594 => "A conversion error has occurred.",
    AppleSslV2Rollback = -67595 => "A SSLv2 rollback error has occurred.",
    DiskFull = -34 => "The disk is full.",
    QuotaExceeded = -67596 => "The quota was exceeded.",
    FileTooBig = -67597 => "The file is too big.",
    InvalidDatabaseBlob = -67598 => "The specified database has an invalid blob.",
    InvalidKeyBlob = -67599 => "The specified database has an invalid key blob.",
    IncompatibleDatabaseBlob = -67600 => "The specified database has an incompatible blob.",
    IncompatibleKeyBlob = -67601 => "The specified database has an incompatible key blob.",
    HostNameMismatch = -67602 => "A host name mismatch has occurred.",
    UnknownCriticalExtensionFlag = -67603 => "There is an unknown critical extension flag.",
    NoBasicConstraints = -67604 => "No basic constraints were found.",
    NoBasicConstraintsCa = -67605 => "No basic CA constraints were found.",
    InvalidAuthorityKeyId = -67606 => "The authority key ID is not valid.",
    InvalidSubjectKeyId = -67607 => "The subject key ID is not valid.",
    InvalidKeyUsageForPolicy = -67608 => "The key usage is not valid for the specified policy.",
    InvalidExtendedKeyUsage = -67609 => "The extended key usage is not valid.",
    InvalidIdLinkage = -67610 => "The ID linkage is not valid.",
    PathLengthConstraintExceeded = -67611 => "The path length constraint was exceeded.",
    InvalidRoot = -67612 => "The root or anchor certificate is not valid.",
    CrlExpired = -67613 => "The CRL has expired.",
    CrlNotValidYet = -67614 => "The CRL is not yet valid.",
    CrlNotFound = -67615 => "The CRL was not found.",
    CrlServerDown = -67616 => "The CRL server is down.",
    CrlBadUri = -67617 => "The CRL has a bad Uniform Resource Identifier.",
    UnknownCertExtension = -67618 => "An unknown certificate extension was encountered.",
    UnknownCrlExtension = -67619 => "An unknown CRL extension was encountered.",
    CrlNotTrusted = -67620 => "The CRL is not trusted.",
    CrlPolicyFailed = -67621 => "The CRL policy failed.",
    IdpFailure = -67622 => "The issuing distribution point was not valid.",
    SmimeEmailAddressesNotFound = -67623 => "An email address mismatch was encountered.",
    SmimeBadExtendedKeyUsage = -67624 => "The appropriate extended key usage for SMIME was not found.",
    SmimeBadKeyUsage = -67625 => "The key usage is not compatible with SMIME.",
    SmimeKeyUsageNotCritical = -67626 => "The key usage extension is not marked as critical.",
    SmimeNoEmailAddress = -67627 => "No email address was found in the certificate.",
    SmimeSubjAltNameNotCritical = -67628 => "The subject alternative name extension is not marked as critical.",
    SslBadExtendedKeyUsage = -67629 => "The appropriate extended key usage for SSL was not found.",
    OcspBadResponse = -67630 => "The OCSP response was incorrect or could not be parsed.",
    OcspBadRequest = -67631 => "The OCSP request was incorrect or could not be parsed.",
    OcspUnavailable = -67632 => "OCSP service is unavailable.",
    OcspStatusUnrecognized = -67633 => "The OCSP server did not recognize this certificate.",
    EndOfData = -67634 => "An end-of-data was detected.",
    IncompleteCertRevocationCheck = -67635 => "An incomplete certificate revocation check occurred.",
    NetworkFailure = -67636 => "A network failure occurred.",
    OcspNotTrustedToAnchor = -67637 => "The OCSP response was not trusted to a root or anchor certificate.",
    RecordModified = -67638 => "The record was modified.",
    OcspSignatureError = -67639 => "The OCSP response had an invalid signature.",
    OcspNoSigner = -67640 => "The OCSP response had no signer.",
    OcspResponderMalformedReq = -67641 => "The OCSP responder was given a malformed request.",
    OcspResponderInternalError = -67642 => "The OCSP responder encountered an internal error.",
    OcspResponderTryLater = -67643 => "The OCSP responder is busy, try again later.",
    OcspResponderSignatureRequired = -67644 => "The OCSP responder requires a signature.",
    OcspResponderUnauthorized = -67645 => "The OCSP responder rejected this request as unauthorized.",
    OcspResponseNonceMismatch = -67646 => "The OCSP response nonce did not match the request.",
    CodeSigningBadCertChainLength = -67647 => "Code signing encountered an incorrect certificate chain length.",
    CodeSigningNoBasicConstraints = -67648 => "Code signing found no basic constraints.",
    CodeSigningBadPathLengthConstraint = -67649 => "Code signing encountered an incorrect path length constraint.",
    CodeSigningNoExtendedKeyUsage = -67650 => "Code signing found no extended key usage.",
    CodeSigningDevelopment = -67651 => "Code signing indicated use of a development-only certificate.",
    ResourceSignBadCertChainLength = -67652 => "Resource signing has encountered an incorrect certificate chain length.",
    ResourceSignBadExtKeyUsage = -67653 => "Resource signing has encountered an error in the extended key usage.",
    TrustSettingDeny = -67654 => "The trust setting for this policy was set to Deny.",
    InvalidSubjectName = -67655 => "An invalid certificate subject name was encountered.",
    UnknownQualifiedCertStatement = -67656 => "An unknown qualified certificate statement was encountered.",
    MobileMeRequestQueued = -67657 => "The MobileMe request will be sent during the next connection.",
    MobileMeRequestRedirected = -67658 => "The MobileMe request was redirected.",
    MobileMeServerError = -67659 => "A MobileMe server error occurred.",
    MobileMeServerNotAvailable = -67660 => "The MobileMe server is not available.",
    MobileMeServerAlreadyExists = -67661 => "The MobileMe server reported that the item already exists.",
    MobileMeServerServiceErr = -67662 => "A MobileMe service error has occurred.",
    MobileMeRequestAlreadyPending = -67663 => "A MobileMe request is already pending.",
    MobileMeNoRequestPending = -67664 => "MobileMe has no request pending.",
    MobileMeCsrVerifyFailure = -67665 => "A MobileMe CSR verification failure has occurred.",
    MobileMeFailedConsistencyCheck = -67666 => "MobileMe has found a failed consistency check.",
    NotInitialized = -67667 => "A function was called without initializing CSSM.",
    InvalidHandleUsage = -67668 => "The CSSM handle does not match with the service type.",
    PvcReferentNotFound = -67669 => "A reference to the calling module was not found in the list of authorized callers.",
    FunctionIntegrityFail = -67670 => "A function address was not within the verified module.",
    InternalError = -67671 => "An internal error has occurred.",
    MemoryError = -67672 => "A memory error has occurred.",
    InvalidData = -67673 => "Invalid data was encountered.",
    MdsError = -67674 => "A Module Directory Service error has occurred.",
    InvalidPointer = -67675 => "An invalid pointer was encountered.",
    SelfCheckFailed = -67676 => "Self-check has failed.",
    FunctionFailed = -67677 => "A function has failed.",
    ModuleManifestVerifyFailed = -67678 => "A module manifest verification failure has occurred.",
    InvalidGuid = -67679 => "An invalid GUID was encountered.",
    InvalidHandle = -67680 => "An invalid handle was encountered.",
    InvalidDbList = -67681 => "An invalid DB list was encountered.",
    InvalidPassthroughId = -67682 => "An invalid passthrough ID was encountered.",
    InvalidNetworkAddress = -67683 => "An invalid network address was encountered.",
    CrlAlreadySigned = -67684 => "The certificate revocation list is already signed.",
    InvalidNumberOfFields = -67685 => "An invalid number of fields were encountered.",
    VerificationFailure = -67686 => "A verification failure occurred.",
    UnknownTag = -67687 => "An unknown tag was encountered.",
    InvalidSignature = -67688 => "An invalid signature was encountered.",
    InvalidName = -67689 => "An invalid name was encountered.",
    InvalidCertificateRef = -67690 => "An invalid certificate reference was encountered.",
    InvalidCertificateGroup = -67691 => "An invalid certificate group was encountered.",
    TagNotFound = -67692 => "The specified tag was not found.",
    InvalidQuery = -67693 => "The specified query was not valid.",
    InvalidValue = -67694 => "An invalid value was detected.",
    CallbackFailed = -67695 => "A callback has failed.",
    AclDeleteFailed = -67696 => "An ACL delete operation has failed.",
    AclReplaceFailed = -67697 => "An ACL replace operation has failed.",
    AclAddFailed = -67698 => "An ACL add operation has failed.",
    AclChangeFailed = -67699 => "An ACL change operation has failed.",
    InvalidAccessCredentials = -67700 => "Invalid access credentials were encountered.",
    InvalidRecord = -67701 => "An invalid record was encountered.",
    InvalidAcl = -67702 => "An invalid ACL was encountered.",
    InvalidSampleValue = -67703 => "An invalid sample value was encountered.",
    IncompatibleVersion = -67704 => "An incompatible version was encountered.",
    PrivilegeNotGranted = -67705 => "The privilege was not granted.",
    InvalidScope = -67706 => "An invalid scope was encountered.",
    PvcAlreadyConfigured = -67707 => "The PVC is already configured.",
    InvalidPvc = -67708 => "An invalid PVC was encountered.",
    EmmLoadFailed = -67709 => "The EMM load has failed.",
    EmmUnloadFailed = -67710 => "The EMM unload has failed.",
    AddinLoadFailed = -67711 => "The add-in load operation has failed.",
    InvalidKeyRef = -67712 => "An invalid key was encountered.",
    InvalidKeyHierarchy = -67713 => "An invalid key hierarchy was encountered.",
    AddinUnloadFailed = -67714 => "The add-in unload operation has failed.",
    LibraryReferenceNotFound = -67715 => "A library reference was not found.",
    InvalidAddinFunctionTable = -67716 => "An invalid add-in function table was encountered.",
    InvalidServiceMask = -67717 => "An invalid service mask was encountered.",
    ModuleNotLoaded = -67718 => "A module was not loaded.",
    InvalidSubServiceId = -67719 => "An invalid subservice ID was encountered.",
    AttributeNotInContext = -67720 => "An attribute was not in the context.",
    ModuleManagerInitializeFailed = -67721 => "A module failed to initialize.",
    ModuleManagerNotFound = -67722 => "A module was not found.",
    EventNotificationCallbackNotFound = -67723 => "An event notification callback was not found.",
    InputLengthError = -67724 => "An input length error was encountered.",
    OutputLengthError = -67725 => "An output length error was encountered.",
    PrivilegeNotSupported = -67726 => "The privilege is not supported.",
    DeviceError = -67727 => "A device error was encountered.",
    AttachHandleBusy = -67728 => "The CSP handle was busy.",
    NotLoggedIn = -67729 => "You are not logged in.",
    AlgorithmMismatch = -67730 => "An algorithm mismatch was encountered.",
    KeyUsageIncorrect = -67731 => "The key usage is incorrect.",
    KeyBlobTypeIncorrect = -67732 => "The key blob type is incorrect.",
    KeyHeaderInconsistent = -67733 => "The key header is inconsistent.",
    UnsupportedKeyFormat = -67734 => "The key header format is not supported.",
    UnsupportedKeySize = -67735 => "The key size is not supported.",
    InvalidKeyUsageMask = -67736 => "The key usage mask is not valid.",
    UnsupportedKeyUsageMask = -67737 => "The key usage mask is not supported.",
    InvalidKeyAttributeMask = -67738 => "The key attribute mask is not valid.",
    UnsupportedKeyAttributeMask = -67739 => "The key attribute mask is not supported.",
    InvalidKeyLabel = -67740 => "The key label is not valid.",
    UnsupportedKeyLabel = -67741 => "The key label is not supported.",
    InvalidKeyFormat = -67742 => "The key format is not valid.",
    UnsupportedVectorOfBuffers = -67743 => "The vector of buffers is not supported.",
    InvalidInputVector = -67744 => "The input vector is not valid.",
    InvalidOutputVector = -67745 => "The output vector is not valid.",
    InvalidContext = -67746 => "An invalid context was encountered.",
    InvalidAlgorithm = -67747 => "An invalid algorithm was encountered.",
    InvalidAttributeKey = -67748 => "A key attribute was not valid.",
    MissingAttributeKey = -67749 => "A key attribute was missing.",
    InvalidAttributeInitVector = -67750 => "An init vector attribute was not valid.",
    MissingAttributeInitVector = -67751 => "An init vector attribute was missing.",
    InvalidAttributeSalt = -67752 => "A salt attribute was not valid.",
    MissingAttributeSalt = -67753 => "A salt attribute was missing.",
    InvalidAttributePadding = -67754 => "A padding attribute was not valid.",
    MissingAttributePadding = -67755 => "A padding attribute was missing.",
    InvalidAttributeRandom = -67756 => "A random number attribute was not valid.",
    MissingAttributeRandom = -67757 => "A random number attribute was missing.",
    InvalidAttributeSeed = -67758 => "A seed attribute was not valid.",
    MissingAttributeSeed = -67759 => "A seed attribute was missing.",
    InvalidAttributePassphrase = -67760 => "A passphrase attribute was not valid.",
    MissingAttributePassphrase = -67761 => "A passphrase attribute was missing.",
    InvalidAttributeKeyLength = -67762 => "A key length attribute was not valid.",
    MissingAttributeKeyLength = -67763 => "A key length attribute was missing.",
    InvalidAttributeBlockSize = -67764 => "A block size attribute was not valid.",
    MissingAttributeBlockSize = -67765 => "A block size attribute was missing.",
    InvalidAttributeOutputSize = -67766 => "An output size attribute was not valid.",
    MissingAttributeOutputSize = -67767 => "An output size attribute was missing.",
    InvalidAttributeRounds = -67768 => "The number of rounds attribute was not valid.",
    MissingAttributeRounds = -67769 => "The number of rounds attribute was missing.",
    InvalidAlgorithmParms = -67770 => "An algorithm parameters attribute was not valid.",
    MissingAlgorithmParms = -67771 => "An algorithm parameters attribute was missing.",
    InvalidAttributeLabel = -67772 => "A label attribute was not valid.",
    MissingAttributeLabel = -67773 => "A label attribute was missing.",
    InvalidAttributeKeyType = -67774 => "A key type attribute was not valid.",
    MissingAttributeKeyType = -67775 => "A key type attribute was missing.",
    InvalidAttributeMode = -67776 => "A mode attribute was not valid.",
    MissingAttributeMode = -67777 => "A mode attribute was missing.",
    InvalidAttributeEffectiveBits = -67778 => "An effective bits attribute was not valid.",
    MissingAttributeEffectiveBits = -67779 => "An effective bits attribute was missing.",
    InvalidAttributeStartDate = -67780 => "A start date attribute was not valid.",
    MissingAttributeStartDate = -67781 => "A start date attribute was missing.",
    InvalidAttributeEndDate = -67782 => "An end date attribute was not valid.",
    MissingAttributeEndDate = -67783 => "An end date attribute was missing.",
    InvalidAttributeVersion = -67784 => "A version attribute was not valid.",
    MissingAttributeVersion = -67785 => "A version attribute was missing.",
    InvalidAttributePrime = -67786 => "A prime attribute was not valid.",
    MissingAttributePrime = -67787 => "A prime attribute was missing.",
    InvalidAttributeBase = -67788 => "A base attribute was not valid.",
    MissingAttributeBase = -67789 => "A base attribute was missing.",
    InvalidAttributeSubprime = -67790 => "A subprime attribute was not valid.",
    MissingAttributeSubprime = -67791 => "A subprime attribute was missing.",
    InvalidAttributeIterationCount = -67792 => "An iteration count attribute was not valid.",
    MissingAttributeIterationCount = -67793 => "An iteration count attribute was missing.",
    InvalidAttributeDldbHandle = -67794 => "A database handle attribute was not valid.",
    MissingAttributeDldbHandle = -67795 => "A database handle attribute was missing.",
    InvalidAttributeAccessCredentials = -67796 => "An access credentials attribute was not valid.",
    MissingAttributeAccessCredentials = -67797 => "An access credentials attribute was missing.",
    InvalidAttributePublicKeyFormat = -67798 => "A public key format attribute was not valid.",
    MissingAttributePublicKeyFormat = -67799 => "A public key format attribute was missing.",
    InvalidAttributePrivateKeyFormat = -67800 => "A private key format attribute was not valid.",
    MissingAttributePrivateKeyFormat = -67801 => "A private key format attribute was missing.",
    InvalidAttributeSymmetricKeyFormat = -67802 => "A symmetric key format attribute was not valid.",
    MissingAttributeSymmetricKeyFormat = -67803 => "A symmetric key format attribute was missing.",
    InvalidAttributeWrappedKeyFormat = -67804 => "A wrapped key format attribute was not valid.",
    MissingAttributeWrappedKeyFormat = -67805 => "A wrapped key format attribute was missing.",
    StagedOperationInProgress = -67806 => "A staged operation is in progress.",
    StagedOperationNotStarted = -67807 => "A staged operation was not started.",
    VerifyFailed = -67808 => "A cryptographic verification failure has occurred.",
    QuerySizeUnknown = -67809 => "The query size is unknown.",
    BlockSizeMismatch = -67810 => "A block size mismatch occurred.",
    PublicKeyInconsistent = -67811 => "The public key was inconsistent.",
    DeviceVerifyFailed = -67812 => "A device verification failure has occurred.",
    InvalidLoginName = -67813 => "An invalid login name was detected.",
    AlreadyLoggedIn = -67814 => "The user is already logged in.",
    InvalidDigestAlgorithm = -67815 => "An invalid digest algorithm was detected.",
    InvalidCrlGroup = -67816 => "An invalid CRL group was detected.",
    CertificateCannotOperate = -67817 => "The certificate cannot operate.",
    CertificateExpired = -67818 => "An expired certificate was detected.",
    CertificateNotValidYet = -67819 => "The certificate is not yet valid.",
    CertificateRevoked = -67820 => "The certificate was revoked.",
    CertificateSuspended = -67821 => "The certificate was suspended.",
    InsufficientCredentials = -67822 => "Insufficient credentials were detected.",
    InvalidAction = -67823 => "The action was not valid.",
    InvalidAuthority = -67824 => "The authority was not valid.",
    VerifyActionFailed = -67825 => "A verify action has failed.",
    InvalidCertAuthority = -67826 => "The certificate authority was not valid.",
    InvalidCrlAuthority = -67827 => "The CRL authority was not valid.",
    InvalidCrlEncoding = -67828 => "The CRL encoding was not valid.",
    InvalidCrlType = -67829 => "The CRL type was not valid.",
    InvalidCrl = -67830 => "The CRL was not valid.",
    InvalidFormType = -67831 => "The form type was not valid.",
    InvalidId = -67832 => "The ID was not valid.",
    InvalidIdentifier = -67833 => "The identifier was not valid.",
    InvalidIndex = -67834 => "The index was not valid.",
    InvalidPolicyIdentifiers = -67835 => "The policy identifiers are not valid.",
    InvalidTimeString = -67836 => "The time specified was not valid.",
    InvalidReason = -67837 => "The trust policy reason was not valid.",
    InvalidRequestInputs = -67838 => "The request inputs are not valid.",
    InvalidResponseVector = -67839 => "The response vector was not valid.",
    InvalidStopOnPolicy = -67840 => "The stop-on policy was not valid.",
    InvalidTuple = -67841 => "The tuple was not valid.",
    MultipleValuesUnsupported = -67842 => "Multiple values are not supported.",
    NotTrusted = -67843 => "The trust policy was not trusted.",
    NoDefaultAuthority = -67844 => "No default authority was detected.",
    RejectedForm = -67845 => "The trust policy had a rejected form.",
    RequestLost = -67846 => "The request was lost.",
    RequestRejected = -67847 => "The request was rejected.",
    UnsupportedAddressType = -67848 => "The address type is not supported.",
    UnsupportedService = -67849 => "The service is not supported.",
    InvalidTupleGroup = -67850 => "The tuple group was not valid.",
    InvalidBaseAcls = -67851 => "The base ACLs are not valid.",
    InvalidTupleCredentials = -67852 => "The tuple credentials are not valid.",
    InvalidEncoding = -67853 => "The encoding was not valid.",
    InvalidValidityPeriod = -67854 => "The validity period was not valid.",
    InvalidRequestor = -67855 => "The requestor was not valid.",
    RequestDescriptor = -67856 => "The request descriptor was not valid.",
    InvalidBundleInfo = -67857 => "The bundle information was not valid.",
    InvalidCrlIndex = -67858 => "The CRL index was not valid.",
    NoFieldValues = -67859 => "No field values were detected.",
    UnsupportedFieldFormat = -67860 => "The field format is not supported.",
    UnsupportedIndexInfo = -67861 => "The index information is not supported.",
    UnsupportedLocality = -67862 => "The locality is not supported.",
    UnsupportedNumAttributes = -67863 => "The number of attributes is not supported.",
    UnsupportedNumIndexes = -67864 => "The number of indexes is not supported.",
    UnsupportedNumRecordTypes = -67865 => "The number of record types is not supported.",
    FieldSpecifiedMultiple = -67866 => "Too many fields were specified.",
    IncompatibleFieldFormat = -67867 => "The field format was incompatible.",
    InvalidParsingModule = -67868 => "The parsing module was not valid.",
    DatabaseLocked = -67869 => "The database is locked.",
    DatastoreIsOpen = -67870 => "The data store is open.",
    MissingValue = -67871 => "A missing value was detected.",
    UnsupportedQueryLimits = -67872 => "The query limits are not supported.",
    UnsupportedNumSelectionPreds = -67873 => "The number of selection predicates is not supported.",
    UnsupportedOperator = -67874 => "The operator is not supported.",
    InvalidDbLocation = -67875 => "The database location is not valid.",
    InvalidAccessRequest = -67876 => "The access request is not valid.",
    InvalidIndexInfo = -67877 => "The index information is not valid.",
    InvalidNewOwner = -67878 => "The new owner is not valid.",
    InvalidModifyMode = -67879 => "The modify mode is not valid.",
    UnknownError = -99999 => "Unknown error has occurred.",
}

/// Reverse table, built on first use and shared for the life of the process.
///
/// `ReturnRefUnsupported` and `ReturnPersistentRefUnsupported` are both
/// documented as -34010. Only the first declared name is reachable from the
/// code; the second keeps its own name and description.
fn decode_table() -> &'static HashMap<StatusCode, Status> {
    static TABLE: OnceLock<HashMap<StatusCode, Status>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::with_capacity(Status::ALL.len());
        for &status in Status::ALL {
            table.entry(status.code()).or_insert(status);
        }
        table
    })
}

impl Status {
    /// Decode a raw code. Total: unknown codes become [`Status::UnknownError`].
    pub fn from_code(code: StatusCode) -> Self {
        decode_table()
            .get(&code)
            .copied()
            .unwrap_or(Status::UnknownError)
    }

    /// Whether `code` names a status in the table
    pub fn is_known(code: StatusCode) -> bool {
        decode_table().contains_key(&code)
    }

    /// All names documented with `code`, in declaration order.
    ///
    /// Usually zero or one; more than one means the table carries an alias
    /// and only the first entry is returned by [`Status::from_code`].
    pub fn names_for_code(code: StatusCode) -> Vec<Status> {
        Status::ALL
            .iter()
            .copied()
            .filter(|status| status.code() == code)
            .collect()
    }

    /// True when decoding this status's own code yields a different name
    pub fn is_shadowed(self) -> bool {
        Status::from_code(self.code()) != self
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Status::from_code(code)
    }
}

impl From<Status> for StatusCode {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
